pub mod elf;

use std::io;

use self::elf::{Elf32Ehdr, Elf64Ehdr};

/// An ELF file header tagged by class, selected once at dispatch time.
///
/// The two variants keep their exact byte shapes; this type only provides the
/// shared view of the fields the editor touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ehdr {
    Elf32(Elf32Ehdr),
    Elf64(Elf64Ehdr),
}

impl Ehdr {
    /// Returns the machine architecture identifier.
    pub fn machine(&self) -> u16 {
        match self {
            Ehdr::Elf32(h) => h.e_machine,
            Ehdr::Elf64(h) => h.e_machine,
        }
    }

    /// Returns the processor-specific flags.
    pub fn flags(&self) -> u32 {
        match self {
            Ehdr::Elf32(h) => h.e_flags,
            Ehdr::Elf64(h) => h.e_flags,
        }
    }

    pub fn set_machine(&mut self, machine: u16) {
        match self {
            Ehdr::Elf32(h) => h.e_machine = machine,
            Ehdr::Elf64(h) => h.e_machine = machine,
        }
    }

    pub fn set_flags(&mut self, flags: u32) {
        match self {
            Ehdr::Elf32(h) => h.e_flags = flags,
            Ehdr::Elf64(h) => h.e_flags = flags,
        }
    }

    /// Returns true if this is a 64-bit header.
    pub fn is_64(&self) -> bool {
        matches!(self, Ehdr::Elf64(_))
    }

    /// On-disk header size for this class (52 or 64 bytes).
    pub fn size(&self) -> usize {
        match self {
            Ehdr::Elf32(_) => Elf32Ehdr::SIZE,
            Ehdr::Elf64(_) => Elf64Ehdr::SIZE,
        }
    }

    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Ehdr::Elf32(h) => h.write_to(out),
            Ehdr::Elf64(h) => h.write_to(out),
        }
    }
}
