//! Command-instruction operand parsing, dispatched by arity (spec.md
//! §4.4.1).

use crate::addressing::classify_operand;
use crate::ast::{AddressingType, CommandPayload};
use crate::errors::AssemblyError;
use crate::lexer::extract_token_until_comma;
use crate::opcode_table::{allowed_dst_modes, allowed_src_modes, Opcode};

fn check_allowed(
    operand: &AddressingType,
    allowed: &[crate::opcode_table::AddressingKind],
    opcode: Opcode,
    position: &str,
    line: usize,
) -> Result<(), AssemblyError> {
    let kind = operand.kind().expect("operand already classified as present");
    if allowed.contains(&kind) {
        Ok(())
    } else {
        Err(AssemblyError::UnknownAddressingForOpcode {
            line,
            reason: format!(
                "{} addressing mode not valid as the {} operand of '{}'",
                position_name(kind),
                position,
                crate::opcode_table::mnemonic(opcode)
            ),
        })
    }
}

fn position_name(kind: crate::opcode_table::AddressingKind) -> &'static str {
    use crate::opcode_table::AddressingKind::*;
    match kind {
        Immediate => "immediate",
        Direct => "direct",
        FixedIndex => "fixed-index",
        DirectRegister => "register",
    }
}

pub fn parse_two_operand(
    opcode: Opcode,
    rest: &str,
    line: usize,
) -> Result<CommandPayload, AssemblyError> {
    let mut cursor = rest;
    if cursor.trim_start().starts_with(',') {
        return Err(AssemblyError::ExtraneousComma {
            line,
            reason: "comma before first operand".to_string(),
        });
    }

    let (tok1, had_comma1) = extract_token_until_comma(&mut cursor);
    if tok1.is_empty() {
        return Err(AssemblyError::MissingOperand {
            line,
            reason: format!("{} requires two operands", crate::opcode_table::mnemonic(opcode)),
        });
    }
    // No comma anywhere in the rest of the line means the whole
    // remainder (e.g. "#5 r3") was swallowed into `tok1` as one merged
    // token. Report the missing separator before attempting to
    // classify that garbage as an operand.
    if !had_comma1 {
        return Err(AssemblyError::MissingComma { line });
    }
    let src = classify_operand(&tok1, line)?;
    check_allowed(&src, allowed_src_modes(opcode), opcode, "source", line)?;

    let (tok2, had_comma2) = extract_token_until_comma(&mut cursor);
    if tok2.is_empty() {
        return Err(if had_comma2 {
            AssemblyError::ExtraneousComma {
                line,
                reason: "doubled comma between operands".to_string(),
            }
        } else {
            AssemblyError::MissingOperand {
                line,
                reason: "missing destination operand".to_string(),
            }
        });
    }
    let dst = classify_operand(&tok2, line)?;
    check_allowed(&dst, allowed_dst_modes(opcode), opcode, "destination", line)?;

    let trailing = cursor.trim();
    if had_comma2 {
        return Err(if trailing.is_empty() {
            AssemblyError::ExtraneousComma {
                line,
                reason: "trailing comma after operands".to_string(),
            }
        } else {
            AssemblyError::RedundantValue {
                line,
                reason: trailing.to_string(),
            }
        });
    }
    if !trailing.is_empty() {
        return Err(AssemblyError::RedundantValue {
            line,
            reason: trailing.to_string(),
        });
    }

    Ok(CommandPayload {
        opcode,
        src_operand: src,
        dst_operand: dst,
    })
}

pub fn parse_one_operand(
    opcode: Opcode,
    rest: &str,
    line: usize,
) -> Result<CommandPayload, AssemblyError> {
    let mut cursor = rest;
    let (tok, had_comma) = extract_token_until_comma(&mut cursor);
    if tok.is_empty() {
        return Err(AssemblyError::MissingOperand {
            line,
            reason: format!("{} requires one operand", crate::opcode_table::mnemonic(opcode)),
        });
    }
    let operand = classify_operand(&tok, line)?;
    check_allowed(&operand, allowed_dst_modes(opcode), opcode, "destination", line)?;

    if had_comma {
        let trailing = cursor.trim();
        return Err(if trailing.is_empty() {
            AssemblyError::ExtraneousComma {
                line,
                reason: "unexpected trailing comma".to_string(),
            }
        } else {
            AssemblyError::RedundantValue {
                line,
                reason: trailing.to_string(),
            }
        });
    }

    Ok(CommandPayload {
        opcode,
        src_operand: AddressingType::None,
        dst_operand: operand,
    })
}

pub fn parse_no_operand(opcode: Opcode, rest: &str, line: usize) -> Result<CommandPayload, AssemblyError> {
    if !rest.trim().is_empty() {
        return Err(AssemblyError::RedundantValue {
            line,
            reason: rest.trim().to_string(),
        });
    }
    Ok(CommandPayload {
        opcode,
        src_operand: AddressingType::None,
        dst_operand: AddressingType::None,
    })
}
