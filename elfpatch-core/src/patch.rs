use anyhow::{Context, Result};

use crate::header::Ehdr;

/// Optional header field overrides. An absent field means "leave the decoded
/// value unchanged".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub machine: Option<u16>,
    pub flags: Option<u32>,
}

impl Patch {
    /// Builds a patch from the hexadecimal override strings supplied on the
    /// command line. An optional `0x` prefix is accepted; anything else that
    /// is not valid hex is a fatal error.
    pub fn from_hex(machine: Option<&str>, flags: Option<&str>) -> Result<Patch> {
        Ok(Patch {
            machine: machine
                .map(|s| {
                    u16::from_str_radix(strip_radix_prefix(s), 16)
                        .with_context(|| format!("invalid hex machine value {s:?}"))
                })
                .transpose()?,
            flags: flags
                .map(|s| {
                    u32::from_str_radix(strip_radix_prefix(s), 16)
                        .with_context(|| format!("invalid hex flags value {s:?}"))
                })
                .transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.machine.is_none() && self.flags.is_none()
    }

    /// Overwrites the requested fields, leaving everything else as decoded.
    pub fn apply(&self, header: &mut Ehdr) {
        if let Some(machine) = self.machine {
            log::info!(
                "machine {:#x} -> {:#x}",
                header.machine(),
                machine
            );
            header.set_machine(machine);
        }
        if let Some(flags) = self.flags {
            log::info!("flags {:#x} -> {:#x}", header.flags(), flags);
            header.set_flags(flags);
        }
    }
}

fn strip_radix_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_overrides() {
        let patch = Patch::from_hex(Some("3e"), Some("80000400")).unwrap();
        assert_eq!(patch.machine, Some(62));
        assert_eq!(patch.flags, Some(0x8000_0400));
    }

    #[test]
    fn accepts_0x_prefix() {
        let patch = Patch::from_hex(Some("0x3E"), None).unwrap();
        assert_eq!(patch.machine, Some(62));
        assert_eq!(patch.flags, None);
    }

    #[test]
    fn absent_overrides_stay_absent() {
        let patch = Patch::from_hex(None, None).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn rejects_non_hex_input() {
        let err = Patch::from_hex(Some("x86_64"), None).unwrap_err();
        assert!(err.to_string().contains("machine"));
        assert!(Patch::from_hex(None, Some("0xzz")).is_err());
    }
}
