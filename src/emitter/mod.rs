//! Emitter (spec.md §4.7, §6): serializes the translation unit's three
//! output artifacts. Writing is all-or-nothing for a file: callers only
//! invoke this once pass 1 and pass 2 have produced zero errors.

pub mod base4;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::assembler::translation_unit::{TranslationUnit, CODE_BASE};
use crate::ast::SymbolKind;

pub fn write_outputs(base_path: &Path, unit: &TranslationUnit) -> Result<()> {
    write_object_file(&base_path.with_extension("ob"), unit)?;
    write_entries_file(&base_path.with_extension("ent"), unit)?;
    write_externals_file(&base_path.with_extension("ext"), unit)?;
    Ok(())
}

fn write_object_file(path: &Path, unit: &TranslationUnit) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{} {}", unit.code_image.len(), unit.data_image.len())?;

    for (i, word) in unit.code_image.iter().enumerate() {
        writeln!(out, "{} {}", CODE_BASE as usize + i, base4::encode_word(*word))?;
    }
    let data_base = CODE_BASE as usize + unit.code_image.len();
    for (i, word) in unit.data_image.iter().enumerate() {
        writeln!(out, "{} {}", data_base + i, base4::encode_word(*word))?;
    }

    out.flush().map_err(Into::into)
}

fn write_entries_file(path: &Path, unit: &TranslationUnit) -> Result<()> {
    if unit.entry_list.is_empty() {
        return Ok(());
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for symbol in &unit.entry_list {
        debug_assert!(matches!(
            symbol.kind,
            SymbolKind::EntryCodeLabel | SymbolKind::EntryDataLabel
        ));
        writeln!(out, "{} {}", symbol.name, symbol.address)?;
    }
    out.flush().map_err(Into::into)
}

fn write_externals_file(path: &Path, unit: &TranslationUnit) -> Result<()> {
    if unit.externals_list.is_empty() {
        return Ok(());
    }
    let mut uses: Vec<_> = unit.externals_list.iter().collect();
    uses.sort_by_key(|use_site| use_site.address);

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for use_site in uses {
        writeln!(out, "{} {}", use_site.name, use_site.address)?;
    }
    out.flush().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble_source;
    use std::fs;

    #[test]
    fn writes_all_three_files_for_a_program_with_entries_and_externals() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("prog");

        let result = assemble_source(
            ".entry MAIN\n.extern EXT\nMAIN: jmp EXT\nhlt\n",
        );
        assert!(result.errors.is_empty());

        write_outputs(&base, &result.unit).unwrap();

        let ob = fs::read_to_string(base.with_extension("ob")).unwrap();
        let mut lines = ob.lines();
        assert_eq!(lines.next().unwrap(), "3 0");
        assert_eq!(lines.next().unwrap().split_whitespace().next().unwrap(), "100");

        let ent = fs::read_to_string(base.with_extension("ent")).unwrap();
        assert_eq!(ent.trim(), "MAIN 100");

        let ext = fs::read_to_string(base.with_extension("ext")).unwrap();
        assert_eq!(ext.trim(), "EXT 101");
    }

    #[test]
    fn skips_ent_and_ext_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("prog");

        let result = assemble_source("hlt\n");
        assert!(result.errors.is_empty());
        write_outputs(&base, &result.unit).unwrap();

        assert!(fs::metadata(base.with_extension("ob")).is_ok());
        assert!(fs::metadata(base.with_extension("ent")).is_err());
        assert!(fs::metadata(base.with_extension("ext")).is_err());
    }
}
