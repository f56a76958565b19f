use anyhow::Result;
use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process::ExitCode;

use word14asm::file_reader::{AsmFileReader, FileReader};

#[derive(ClapParser)]
#[clap(version, author, about = "Two-pass assembler for the 14-bit word instruction set")]
struct Opts {
    /// Source files to assemble, each processed independently.
    #[clap(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();
    let reader = AsmFileReader;

    let mut all_succeeded = true;
    for input in &opts.inputs {
        if !assemble_one(&reader, input)? {
            all_succeeded = false;
        }
    }

    Ok(if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Assembles a single input file, printing any errors to stderr. Returns
/// `false` (without propagating) for assembly-level failures so the rest
/// of the batch still runs; only I/O setup failures bubble up via `?`.
fn assemble_one(reader: &dyn FileReader, input: &PathBuf) -> Result<bool> {
    let source = reader.read_to_string(input)?;
    let output_base = input.with_extension("");

    match word14asm::assemble_file(&source, &output_base) {
        Ok(result) => {
            for warning in &result.warnings {
                eprintln!("{}: warning: {}", input.display(), warning);
            }
            println!("{}: assembled successfully", input.display());
            Ok(true)
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{}:{}: {}", input.display(), error.line(), error);
            }
            Ok(false)
        }
    }
}
