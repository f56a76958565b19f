//! Addressing-mode recognizer (spec.md §4.2): classifies one trimmed
//! operand string into exactly one of four addressing types, testing the
//! candidate forms in the fixed order the spec mandates (registers must
//! be checked before plain labels, since `r1` is itself valid label
//! syntax).

use crate::ast::{AddressingType, IntOrConstant};
use crate::errors::AssemblyError;
use crate::lexer::{is_valid_label_syntax, parse_integer};

pub fn int_or_constant(token: &str, line: usize) -> Result<IntOrConstant, AssemblyError> {
    if let Ok(value) = parse_integer(token) {
        Ok(IntOrConstant::Literal(value))
    } else if is_valid_label_syntax(token) {
        Ok(IntOrConstant::Constant(token.to_string()))
    } else {
        Err(AssemblyError::OperandFormat {
            line,
            reason: format!("'{}' is neither a valid integer nor a valid identifier", token),
        })
    }
}

fn as_register(w: &str) -> Option<u8> {
    let mut chars = w.chars();
    let r = chars.next()?;
    if r != 'r' && r != 'R' {
        return None;
    }
    let digit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let n = digit.to_digit(10)?;
    if n <= 7 {
        Some(n as u8)
    } else {
        None
    }
}

pub fn classify_operand(w: &str, line: usize) -> Result<AddressingType, AssemblyError> {
    let w = w.trim();

    if let Some(rest) = w.strip_prefix('#') {
        return if let Ok(value) = parse_integer(rest) {
            Ok(AddressingType::Immediate(IntOrConstant::Literal(value)))
        } else if is_valid_label_syntax(rest) {
            Ok(AddressingType::Immediate(IntOrConstant::Constant(
                rest.to_string(),
            )))
        } else {
            Err(AssemblyError::OperandFormat {
                line,
                reason: format!(
                    "'{}' after '#' is neither a valid integer nor a valid identifier",
                    rest
                ),
            })
        };
    }

    if let Some(reg) = as_register(w) {
        return Ok(AddressingType::DirectRegister { reg });
    }

    if let Some(bracket_idx) = w.find('[') {
        let label = &w[..bracket_idx];
        if !is_valid_label_syntax(label) {
            return Err(AssemblyError::OperandFormat {
                line,
                reason: format!("'{}' is not a valid label for fixed-index addressing", label),
            });
        }
        let after_bracket = &w[bracket_idx + 1..];
        let close_idx = after_bracket.find(']').ok_or_else(|| AssemblyError::OperandFormat {
            line,
            reason: format!("missing closing ']' in '{}'", w),
        })?;
        let index_tok = after_bracket[..close_idx].trim();
        if index_tok.is_empty() {
            return Err(AssemblyError::OperandFormat {
                line,
                reason: format!("empty index in '{}'", w),
            });
        }
        let trailing = after_bracket[close_idx + 1..].trim();
        if !trailing.is_empty() {
            return Err(AssemblyError::OperandFormat {
                line,
                reason: format!("unexpected content after ']' in '{}'", w),
            });
        }
        let index = int_or_constant(index_tok, line)?;
        return Ok(AddressingType::FixedIndex {
            label: label.to_string(),
            index,
        });
    }

    if is_valid_label_syntax(w) {
        return Ok(AddressingType::Direct {
            label: w.to_string(),
        });
    }

    Err(AssemblyError::OperandFormat {
        line,
        reason: format!("'{}' is not a valid operand", w),
    })
}
