use anyhow::Result;
use clap::Parser;
use elfpatch_core::Patch;

/// Simple ELF header editing CLI
#[derive(Parser)]
#[command(
    name = "elfpatch",
    about = "Rewrite the machine and flags fields of an ELF file header",
    version,
    author
)]
struct Cli {
    /// Machine override in hex (e.g. 3e for x86-64)
    #[arg(short, long, value_name = "HEX")]
    machine: Option<String>,

    /// Flags override in hex
    #[arg(short, long, value_name = "HEX")]
    flags: Option<String>,

    /// Input ELF file
    #[arg(short, long, value_name = "PATH")]
    input: std::path::PathBuf,

    /// Output file to generate
    #[arg(short, long, value_name = "PATH")]
    output: std::path::PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let patch = Patch::from_hex(cli.machine.as_deref(), cli.flags.as_deref())?;
    if patch.is_empty() {
        log::warn!("no overrides given; output will be a plain copy of the input");
    }

    elfpatch_core::patch_file(&cli.input, &cli.output, &patch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
