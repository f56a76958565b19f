//! A two-pass assembler for a 14-bit-word instruction set (spec.md
//! §1-§9): lexing and parsing into an abstract line representation,
//! symbol resolution and instruction encoding, and emission of the
//! `.ob`/`.ent`/`.ext` output triple.

pub mod addressing;
pub mod assembler;
pub mod ast;
pub mod emitter;
pub mod errors;
pub mod file_reader;
pub mod lexer;
pub mod opcode_table;
pub mod parser;
pub mod reserved;

use std::path::Path;

use assembler::AssembledFile;
use errors::AssemblyError;

/// Runs the full pipeline over one source file's text and, if it
/// produced no errors, writes the `.ob`/`.ent`/`.ext` triple next to
/// `output_base`. On any error, nothing is written (spec.md §6).
pub fn assemble_file(source: &str, output_base: &Path) -> Result<AssembledFile, Vec<AssemblyError>> {
    let result = assembler::assemble_source(source);
    if !result.errors.is_empty() {
        return Err(result.errors);
    }
    if let Err(e) = emitter::write_outputs(output_base, &result.unit) {
        return Err(vec![AssemblyError::Io(e.to_string())]);
    }
    Ok(result)
}
