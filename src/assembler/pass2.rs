//! Second pass / encoder (spec.md §4.6): bit-packed encoding of
//! instruction words, symbol resolution, and external-use recording.

use crate::ast::{AbstractLineDescriptor, AddressingType, CommandPayload, IntOrConstant, LineKind, SymbolKind};
use crate::errors::AssemblyError;
use crate::opcode_table;

use super::numeric::{fits_12_bit_signed, mask_12};
use super::translation_unit::{ExternalUse, TranslationUnit, CODE_BASE};

const ARE_ABSOLUTE: u16 = 0b00;
const ARE_EXTERNAL: u16 = 0b01;
const ARE_RELOCATABLE: u16 = 0b10;

pub fn run(lines: &[AbstractLineDescriptor], unit: &mut TranslationUnit) -> Vec<AssemblyError> {
    let mut errors = Vec::new();
    let mut idx: usize = 0;

    for line in lines {
        if line.error.is_some() {
            continue;
        }
        if let LineKind::Command(payload) = &line.kind {
            let base_ic = CODE_BASE + idx as u16;
            let (words, line_errors) = encode_instruction(payload, unit, base_ic, line.line_number);
            for (offset, word) in words.iter().enumerate() {
                unit.code_image[idx + offset] = *word;
            }
            idx += words.len();
            errors.extend(line_errors);
        }
    }

    errors
}

fn encode_instruction(
    payload: &CommandPayload,
    unit: &mut TranslationUnit,
    base_ic: u16,
    line: usize,
) -> (Vec<u16>, Vec<AssemblyError>) {
    let opcode_code = opcode_table::code(payload.opcode);
    let src_bits = payload.src_operand.kind().map(|k| k as u16).unwrap_or(0);
    let dst_bits = payload.dst_operand.kind().map(|k| k as u16).unwrap_or(0);
    let first_word = ((opcode_code & 0xF) << 6) | ((src_bits & 0b11) << 4) | ((dst_bits & 0b11) << 2);

    let both_registers = matches!(payload.src_operand, AddressingType::DirectRegister { .. })
        && matches!(payload.dst_operand, AddressingType::DirectRegister { .. });

    if both_registers {
        let src_reg = match payload.src_operand {
            AddressingType::DirectRegister { reg } => reg,
            _ => unreachable!(),
        };
        let dst_reg = match payload.dst_operand {
            AddressingType::DirectRegister { reg } => reg,
            _ => unreachable!(),
        };
        let reg_word = ((src_reg as u16) << 5) | ((dst_reg as u16) << 2);
        return (vec![first_word, reg_word], Vec::new());
    }

    let mut words = vec![first_word];
    let mut errors = Vec::new();
    let mut next_address = base_ic + 1;

    let (src_words, src_errors) = encode_operand(&payload.src_operand, next_address, unit, line);
    next_address += src_words.len() as u16;
    words.extend(src_words);
    errors.extend(src_errors);

    let (dst_words, dst_errors) = encode_operand(&payload.dst_operand, next_address, unit, line);
    words.extend(dst_words);
    errors.extend(dst_errors);

    (words, errors)
}

fn resolve_immediate(
    value: &IntOrConstant,
    unit: &TranslationUnit,
    line: usize,
    errors: &mut Vec<AssemblyError>,
) -> Option<i32> {
    match value {
        IntOrConstant::Literal(v) => Some(*v),
        IntOrConstant::Constant(name) => match unit.constant_table.get(name) {
            Some(constant) => Some(constant.value),
            None => {
                errors.push(AssemblyError::UnfoundConst {
                    line,
                    name: name.clone(),
                });
                None
            }
        },
    }
}

fn encode_label_word(
    label: &str,
    address: u16,
    unit: &mut TranslationUnit,
    line: usize,
) -> (Option<u16>, Vec<AssemblyError>) {
    let mut errors = Vec::new();
    match unit.symbol_table.get(label).cloned() {
        None => {
            errors.push(AssemblyError::UnfoundLabel {
                line,
                name: label.to_string(),
            });
            (None, errors)
        }
        Some(symbol) => {
            if symbol.kind == SymbolKind::ExternLabel {
                unit.externals_list.push(ExternalUse {
                    name: label.to_string(),
                    address,
                });
                (Some(ARE_EXTERNAL), errors)
            } else {
                (Some((symbol.address << 2) | ARE_RELOCATABLE), errors)
            }
        }
    }
}

fn encode_operand(
    op: &AddressingType,
    address: u16,
    unit: &mut TranslationUnit,
    line: usize,
) -> (Vec<u16>, Vec<AssemblyError>) {
    match op {
        AddressingType::None => (Vec::new(), Vec::new()),

        AddressingType::Immediate(value) => {
            let mut errors = Vec::new();
            match resolve_immediate(value, unit, line, &mut errors) {
                None => (vec![0], errors),
                Some(v) if !fits_12_bit_signed(v) => {
                    errors.push(AssemblyError::BitOverflow { line, value: v });
                    (vec![0], errors)
                }
                Some(v) => (vec![(mask_12(v) << 2) | ARE_ABSOLUTE], errors),
            }
        }

        AddressingType::Direct { label } => {
            let (word, errors) = encode_label_word(label, address, unit, line);
            (vec![word.unwrap_or(0)], errors)
        }

        AddressingType::FixedIndex { label, index } => {
            let (label_word, mut errors) = encode_label_word(label, address, unit, line);

            // Attempt index resolution even if the label lookup failed, so
            // every error in the line surfaces in one run (spec.md §4.6).
            let index_word = match resolve_immediate(index, unit, line, &mut errors) {
                None => None,
                Some(v) if v < 0 => {
                    errors.push(AssemblyError::NegativeIndex { line, value: v });
                    None
                }
                Some(v) if !fits_12_bit_signed(v) => {
                    errors.push(AssemblyError::BitOverflow { line, value: v });
                    None
                }
                Some(v) => Some((mask_12(v) << 2) | ARE_ABSOLUTE),
            };

            (vec![label_word.unwrap_or(0), index_word.unwrap_or(0)], errors)
        }

        // A lone DirectRegister operand (the double-register pairing is
        // handled separately in encode_instruction) emits no extra word
        // of its own — the addressing-mode bits already in the first
        // word are the only trace of it (spec.md §8 scenarios 1 and 4).
        AddressingType::DirectRegister { .. } => (Vec::new(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::pass1;
    use crate::parser::parse_program;

    fn assemble(src: &str) -> (TranslationUnit, Vec<AssemblyError>) {
        let (lines, _warnings) = parse_program(src);
        let (mut unit, mut errors) = pass1::run(&lines);
        errors.extend(run(&lines, &mut unit));
        (unit, errors)
    }

    #[test]
    fn hello_world_data_scenario() {
        let (unit, errors) = assemble("MAIN: mov #5, r3\nhlt\n");
        assert!(errors.is_empty());
        assert_eq!(unit.code_image.len(), 2);
        assert_eq!(unit.code_image[0], 12);
        assert_eq!(unit.code_image[1], 20);
        assert_eq!(unit.symbol_table["MAIN"].address, 100);
    }

    #[test]
    fn double_register_scenario() {
        let (unit, errors) = assemble("add r1, r2\n");
        assert!(errors.is_empty());
        assert_eq!(unit.code_image.len(), 2);
        assert_eq!(unit.code_image[0], 188);
        assert_eq!(unit.code_image[1], 40);
    }

    #[test]
    fn external_reference_scenario() {
        let (unit, errors) = assemble(".extern EXT\njmp EXT\n");
        assert!(errors.is_empty());
        assert_eq!(unit.code_image[0], 580);
        assert_eq!(unit.code_image[1], 1);
        assert_eq!(unit.externals_list, vec![ExternalUse { name: "EXT".to_string(), address: 101 }]);
    }

    #[test]
    fn fixed_index_with_constant_scenario() {
        let (unit, errors) = assemble(
            ".define SZ = 3\nLIST: .data 10, 20, 30\nmov LIST[SZ], r0\n",
        );
        assert!(errors.is_empty());
        // mov LIST[SZ], r0 => 1 (opcode) + 2 (fixed index) + 0 (lone
        // register dst contributes no extra word) = 3 words
        assert_eq!(unit.code_image.len(), 3);
        assert_eq!(unit.code_image[2], 3 << 2); // index word for SZ=3
    }

    #[test]
    fn immediate_boundaries() {
        let (unit, errors) = assemble("mov #2047, r0\n");
        assert!(errors.is_empty());
        assert_eq!(unit.code_image[1], (2047 & 0xFFF) << 2);

        let (_, errors) = assemble("mov #2048, r0\n");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AssemblyError::BitOverflow { .. }));

        let (unit, errors) = assemble("mov #-2048, r0\n");
        assert!(errors.is_empty());
        assert_eq!(unit.code_image[1], (((-2048i32) & 0xFFF) as u16) << 2);
    }

    #[test]
    fn undeclared_external_use_is_unfound_label() {
        let (_, errors) = assemble("jmp NEVER_DECLARED\n");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AssemblyError::UnfoundLabel { .. }));
    }

    #[test]
    fn negative_fixed_index_is_an_error() {
        let (_, errors) = assemble("LIST: .data 1\nmov LIST[-1], r0\n");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AssemblyError::NegativeIndex { .. }));
    }
}
