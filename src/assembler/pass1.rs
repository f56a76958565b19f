//! First pass (spec.md §4.5): symbol table construction, address
//! assignment, constant resolution, and data/string image emission.

use crate::ast::{AbstractLineDescriptor, IntOrConstant, LineKind, SymbolKind};
use crate::errors::AssemblyError;

use super::numeric::{fits_12_bit_signed, mask_14};
use super::translation_unit::TranslationUnit;
use super::instruction_word_count;

struct DeferredDataWord {
    data_index: usize,
    constant_name: String,
    line: usize,
}

pub fn run(lines: &[AbstractLineDescriptor]) -> (TranslationUnit, Vec<AssemblyError>) {
    let mut unit = TranslationUnit::new();
    let mut errors = Vec::new();
    let mut entry_buffer: Vec<(String, usize)> = Vec::new();
    let mut deferred: Vec<DeferredDataWord> = Vec::new();

    for line in lines {
        if let Some(err) = &line.error {
            errors.push(err.clone());
            continue;
        }

        if let Some(label) = &line.label {
            let insert_result = match &line.kind {
                LineKind::Command(_) => Some(unit.insert_symbol(
                    label,
                    unit.ic(),
                    SymbolKind::CodeLabel,
                    line.line_number,
                )),
                LineKind::DataDirective(_) | LineKind::StringDirective(_) => Some(unit.insert_symbol(
                    label,
                    unit.dc(),
                    SymbolKind::DataLabel,
                    line.line_number,
                )),
                _ => None,
            };
            if let Some(Err(e)) = insert_result {
                errors.push(e);
            }
        }

        match &line.kind {
            LineKind::Empty => {}

            LineKind::ConstantDefinition(payload) => {
                if let Err(e) = unit.insert_constant(&payload.name, payload.value, line.line_number) {
                    errors.push(e);
                }
            }

            LineKind::DataDirective(payload) => {
                for value in &payload.values {
                    match value {
                        IntOrConstant::Literal(v) => {
                            push_data_word(&mut unit, &mut errors, *v, line.line_number)
                        }
                        IntOrConstant::Constant(name) => {
                            if let Some(constant) = unit.constant_table.get(name) {
                                let v = constant.value;
                                push_data_word(&mut unit, &mut errors, v, line.line_number);
                            } else {
                                deferred.push(DeferredDataWord {
                                    data_index: unit.data_image.len(),
                                    constant_name: name.clone(),
                                    line: line.line_number,
                                });
                                unit.data_image.push(0);
                            }
                        }
                    }
                }
            }

            LineKind::StringDirective(payload) => {
                for ch in payload.text.chars() {
                    unit.data_image.push(ch as u16);
                }
                unit.data_image.push(0);
            }

            LineKind::EntryDirective(name) => {
                entry_buffer.push((name.clone(), line.line_number));
            }

            LineKind::ExternDirective(name) => {
                if let Err(e) = unit.insert_symbol(name, 0, SymbolKind::ExternLabel, line.line_number) {
                    errors.push(e);
                }
            }

            LineKind::Command(payload) => {
                let words = instruction_word_count(payload);
                for _ in 0..words {
                    unit.code_image.push(0);
                }
            }
        }
    }

    // Relocate DATA_LABELs into the unified address space now that the
    // final IC is known (spec.md §3 invariants, §9 open question).
    let final_ic = unit.ic();
    for symbol in unit.symbol_table.values_mut() {
        if matches!(symbol.kind, SymbolKind::DataLabel | SymbolKind::EntryDataLabel) {
            symbol.address += final_ic;
        }
    }

    // Resolve .entry names against the now-final symbol table.
    for (name, line_num) in entry_buffer {
        match unit.symbol_table.get(&name).map(|s| s.kind) {
            None => errors.push(AssemblyError::UnfoundLabel {
                line: line_num,
                name: name.clone(),
            }),
            Some(SymbolKind::ExternLabel) => errors.push(AssemblyError::ExternCannotBeEntry {
                line: line_num,
                name: name.clone(),
            }),
            Some(kind) => {
                let upgraded = match kind {
                    SymbolKind::CodeLabel => SymbolKind::EntryCodeLabel,
                    SymbolKind::DataLabel => SymbolKind::EntryDataLabel,
                    already_entry => already_entry,
                };
                if let Some(symbol) = unit.symbol_table.get_mut(&name) {
                    symbol.kind = upgraded;
                }
            }
        }
    }

    unit.entry_list = unit
        .symbol_table
        .values()
        .filter(|s| matches!(s.kind, SymbolKind::EntryCodeLabel | SymbolKind::EntryDataLabel))
        .cloned()
        .collect();
    unit.entry_list.sort_by(|a, b| a.name.cmp(&b.name));

    // Resolve deferred `.data` constant references.
    for deferred_word in deferred {
        match unit.constant_table.get(&deferred_word.constant_name) {
            Some(constant) => {
                let value = constant.value;
                if fits_12_bit_signed(value) {
                    unit.data_image[deferred_word.data_index] = mask_14(value);
                } else {
                    errors.push(AssemblyError::BitOverflow {
                        line: deferred_word.line,
                        value,
                    });
                }
            }
            None => errors.push(AssemblyError::UnfoundConst {
                line: deferred_word.line,
                name: deferred_word.constant_name,
            }),
        }
    }

    (unit, errors)
}

fn push_data_word(unit: &mut TranslationUnit, errors: &mut Vec<AssemblyError>, value: i32, line: usize) {
    if fits_12_bit_signed(value) {
        unit.data_image.push(mask_14(value));
    } else {
        errors.push(AssemblyError::BitOverflow { line, value });
        unit.data_image.push(0);
    }
}
