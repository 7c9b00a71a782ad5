use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::header::elf::{Elf32Ehdr, Elf64Ehdr, EI_CLASS, EI_NIDENT, ELFCLASS32, ELFCLASS64};
use crate::header::Ehdr;
use crate::patch::Patch;

/// Patches the ELF header at the start of `input` and streams the result to
/// `output`: the re-encoded header first, then every remaining input byte
/// verbatim.
///
/// The class byte at offset 4 of the identification prefix selects the 32-bit
/// or 64-bit header layout. Any other class value is an error; no output is
/// produced for it. The magic number is deliberately not checked.
pub fn patch_stream<R, W>(input: &mut R, output: &mut W, patch: &Patch) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    let mut ident = [0u8; EI_NIDENT];
    input
        .read_exact(&mut ident)
        .context("input too short for the ELF identification bytes")?;
    // The codec re-reads the identification bytes as part of the full header.
    input.seek(SeekFrom::Start(0))?;

    let mut header = match ident[EI_CLASS] {
        ELFCLASS32 => Ehdr::Elf32(
            Elf32Ehdr::from_reader(input).context("input too short for a 32-bit ELF header")?,
        ),
        ELFCLASS64 => Ehdr::Elf64(
            Elf64Ehdr::from_reader(input).context("input too short for a 64-bit ELF header")?,
        ),
        other => bail!(
            "unrecognized ELF class byte {other:#04x} (expected 1 for 32-bit or 2 for 64-bit)"
        ),
    };
    log::info!(
        "{}-bit ELF header, {} bytes",
        if header.is_64() { 64 } else { 32 },
        header.size()
    );

    patch.apply(&mut header);

    let mut encoded = Vec::with_capacity(header.size());
    header.write_to(&mut encoded)?;
    output.write_all(&encoded)?;

    let tail = io::copy(input, output)?;
    log::info!("copied {tail} tail bytes unchanged");
    Ok(())
}

/// File-level front end for [`patch_stream`]. The result is written to a
/// sibling temporary file and renamed onto `output` only on full success, so
/// a failure mid-run never leaves a partial file at the output path.
pub fn patch_file(input: &Path, output: &Path, patch: &Patch) -> Result<()> {
    let mut in_file = File::open(input)
        .with_context(|| format!("failed to open input file {}", input.display()))?;

    let tmp = tmp_path(output);
    if let Err(err) = write_patched(&mut in_file, &tmp, patch) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    fs::rename(&tmp, output)
        .with_context(|| format!("failed to move temporary file onto {}", output.display()))?;
    Ok(())
}

fn write_patched(in_file: &mut File, tmp: &Path, patch: &Patch) -> Result<()> {
    let mut out_file = File::create(tmp)
        .with_context(|| format!("failed to open output file {}", tmp.display()))?;
    patch_stream(in_file, &mut out_file, patch)?;
    out_file.flush()?;
    Ok(())
}

fn tmp_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("elfpatch"));
    name.push(".tmp");
    output.with_file_name(name)
}
