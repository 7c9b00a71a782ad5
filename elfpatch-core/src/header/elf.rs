use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use std::io;

/// Number of identification bytes at the start of every ELF file.
pub const EI_NIDENT: usize = 16;

/// Offset of the class byte within the identification bytes.
pub const EI_CLASS: usize = 4;

/// Class byte value marking a 32-bit object file.
pub const ELFCLASS32: u8 = 1;

/// Class byte value marking a 64-bit object file.
pub const ELFCLASS64: u8 = 2;

/// Represents the ELF (Executable and Linkable Format) header for a 64-bit object file.
///
/// This structure corresponds to the standard `Elf64_Ehdr` defined in the ELF specification.
/// It appears at the very beginning of every ELF file and contains metadata describing
/// the file's organization and layout.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf64Ehdr {
    /// ELF identification bytes (magic number and other information).
    ///
    /// The first 4 bytes should be `0x7F`, `'E'`, `'L'`, `'F'`.
    /// Remaining bytes encode class (32/64-bit), endianness, and version.
    pub e_ident: [u8; EI_NIDENT],

    /// Object file type (e.g. relocatable, executable, shared, core).
    pub e_type: u16,

    /// Target architecture (e.g., x86_64, ARM).
    ///
    /// Common values:
    /// - `EM_X86_64` (62)
    /// - `EM_AARCH64` (183)
    pub e_machine: u16,

    /// ELF version (usually set to `EV_CURRENT` = 1).
    pub e_version: u32,

    /// Virtual address of the program entry point.
    pub e_entry: u64,

    /// File offset of the program header table.
    pub e_phoff: u64,

    /// File offset of the section header table.
    pub e_shoff: u64,

    /// Processor-specific flags.
    pub e_flags: u32,

    /// Size of this ELF header (usually `64` bytes for ELF64).
    pub e_ehsize: u16,

    /// Size of one entry in the program header table.
    pub e_phentsize: u16,

    /// Number of entries in the program header table.
    pub e_phnum: u16,

    /// Size of one entry in the section header table.
    pub e_shentsize: u16,

    /// Number of entries in the section header table.
    pub e_shnum: u16,

    /// Index of the section header string table.
    pub e_shstrndx: u16,
}

impl Elf64Ehdr {
    /// On-disk size of a 64-bit ELF header.
    pub const SIZE: usize = 64;

    pub fn from_reader<R: io::Read>(cur: &mut R) -> io::Result<Elf64Ehdr> {
        let mut e_ident = [0u8; EI_NIDENT];
        cur.read_exact(&mut e_ident)?;

        Ok(Elf64Ehdr {
            e_ident,
            e_type: cur.read_u16::<LE>()?,
            e_machine: cur.read_u16::<LE>()?,
            e_version: cur.read_u32::<LE>()?,
            e_entry: cur.read_u64::<LE>()?,
            e_phoff: cur.read_u64::<LE>()?,
            e_shoff: cur.read_u64::<LE>()?,
            e_flags: cur.read_u32::<LE>()?,
            e_ehsize: cur.read_u16::<LE>()?,
            e_phentsize: cur.read_u16::<LE>()?,
            e_phnum: cur.read_u16::<LE>()?,
            e_shentsize: cur.read_u16::<LE>()?,
            e_shnum: cur.read_u16::<LE>()?,
            e_shstrndx: cur.read_u16::<LE>()?,
        })
    }

    /// Serializes the header in its exact on-disk layout. Writing a header
    /// decoded by [`Elf64Ehdr::from_reader`] reproduces the input bytes.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.e_ident)?;
        out.write_u16::<LE>(self.e_type)?;
        out.write_u16::<LE>(self.e_machine)?;
        out.write_u32::<LE>(self.e_version)?;
        out.write_u64::<LE>(self.e_entry)?;
        out.write_u64::<LE>(self.e_phoff)?;
        out.write_u64::<LE>(self.e_shoff)?;
        out.write_u32::<LE>(self.e_flags)?;
        out.write_u16::<LE>(self.e_ehsize)?;
        out.write_u16::<LE>(self.e_phentsize)?;
        out.write_u16::<LE>(self.e_phnum)?;
        out.write_u16::<LE>(self.e_shentsize)?;
        out.write_u16::<LE>(self.e_shnum)?;
        out.write_u16::<LE>(self.e_shstrndx)?;
        Ok(())
    }
}

/// The 32-bit counterpart of [`Elf64Ehdr`] (`Elf32_Ehdr`).
///
/// Same field order, but the entry point and table offsets are 4 bytes wide,
/// giving a 52-byte header instead of 64.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf32Ehdr {
    pub e_ident: [u8; EI_NIDENT],
    pub e_type: u16,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u32,
    pub e_phoff: u32,
    pub e_shoff: u32,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

impl Elf32Ehdr {
    /// On-disk size of a 32-bit ELF header.
    pub const SIZE: usize = 52;

    pub fn from_reader<R: io::Read>(cur: &mut R) -> io::Result<Elf32Ehdr> {
        let mut e_ident = [0u8; EI_NIDENT];
        cur.read_exact(&mut e_ident)?;

        Ok(Elf32Ehdr {
            e_ident,
            e_type: cur.read_u16::<LE>()?,
            e_machine: cur.read_u16::<LE>()?,
            e_version: cur.read_u32::<LE>()?,
            e_entry: cur.read_u32::<LE>()?,
            e_phoff: cur.read_u32::<LE>()?,
            e_shoff: cur.read_u32::<LE>()?,
            e_flags: cur.read_u32::<LE>()?,
            e_ehsize: cur.read_u16::<LE>()?,
            e_phentsize: cur.read_u16::<LE>()?,
            e_phnum: cur.read_u16::<LE>()?,
            e_shentsize: cur.read_u16::<LE>()?,
            e_shnum: cur.read_u16::<LE>()?,
            e_shstrndx: cur.read_u16::<LE>()?,
        })
    }

    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.e_ident)?;
        out.write_u16::<LE>(self.e_type)?;
        out.write_u16::<LE>(self.e_machine)?;
        out.write_u32::<LE>(self.e_version)?;
        out.write_u32::<LE>(self.e_entry)?;
        out.write_u32::<LE>(self.e_phoff)?;
        out.write_u32::<LE>(self.e_shoff)?;
        out.write_u32::<LE>(self.e_flags)?;
        out.write_u16::<LE>(self.e_ehsize)?;
        out.write_u16::<LE>(self.e_phentsize)?;
        out.write_u16::<LE>(self.e_phnum)?;
        out.write_u16::<LE>(self.e_shentsize)?;
        out.write_u16::<LE>(self.e_shnum)?;
        out.write_u16::<LE>(self.e_shstrndx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn elf64_round_trips_byte_for_byte() {
        let input: Vec<u8> = (0..Elf64Ehdr::SIZE as u8)
            .map(|b| b.wrapping_mul(7))
            .collect();
        let header = Elf64Ehdr::from_reader(&mut Cursor::new(&input)).unwrap();
        let mut output = Vec::new();
        header.write_to(&mut output).unwrap();
        assert_eq!(input, output);
    }

    #[test]
    fn elf32_round_trips_byte_for_byte() {
        let input: Vec<u8> = (0..Elf32Ehdr::SIZE as u8)
            .map(|b| b.wrapping_add(3))
            .collect();
        let header = Elf32Ehdr::from_reader(&mut Cursor::new(&input)).unwrap();
        let mut output = Vec::new();
        header.write_to(&mut output).unwrap();
        assert_eq!(input, output);
    }

    #[test]
    fn short_input_fails_to_decode() {
        let input = vec![0u8; Elf64Ehdr::SIZE - 1];
        assert!(Elf64Ehdr::from_reader(&mut Cursor::new(&input)).is_err());
    }
}
