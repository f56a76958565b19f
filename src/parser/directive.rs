//! Directive-line parsing: `.define`, `.data`, `.string`, `.entry`,
//! `.extern` (spec.md §4.4).

use crate::addressing::int_or_constant;
use crate::ast::{ConstantDefPayload, DataPayload, IntOrConstant, StringPayload};
use crate::errors::AssemblyError;
use crate::lexer::{extract_first_word, extract_token_until_comma, is_valid_label_syntax, parse_integer};

pub fn parse_define(rest: &str, line: usize) -> Result<ConstantDefPayload, AssemblyError> {
    let eq_idx = rest.find('=').ok_or_else(|| AssemblyError::MalformedDirective {
        line,
        reason: "expected 'NAME = VALUE' after .define".to_string(),
    })?;
    let name = rest[..eq_idx].trim();
    let value_tok = rest[eq_idx + 1..].trim();

    if !is_valid_label_syntax(name) {
        return Err(AssemblyError::LabelSyntax {
            line,
            reason: format!("'{}' is not a valid constant name", name),
        });
    }
    let value = parse_integer(value_tok).map_err(|_| AssemblyError::MalformedDirective {
        line,
        reason: format!("'{}' is not a valid integer value", value_tok),
    })?;

    Ok(ConstantDefPayload {
        name: name.to_string(),
        value,
    })
}

pub fn parse_data(rest: &str, line: usize) -> Result<DataPayload, AssemblyError> {
    let trimmed = rest.trim();
    if trimmed.is_empty() {
        return Err(AssemblyError::MissingOperand {
            line,
            reason: ".data requires at least one value".to_string(),
        });
    }

    let mut cursor = rest;
    let mut values: Vec<IntOrConstant> = Vec::new();
    loop {
        let (tok, had_comma) = extract_token_until_comma(&mut cursor);
        if tok.is_empty() {
            return Err(AssemblyError::ExtraneousComma {
                line,
                reason: "empty value between commas in .data list".to_string(),
            });
        }
        values.push(int_or_constant(&tok, line)?);
        if !had_comma {
            break;
        }
    }
    Ok(DataPayload { values })
}

pub fn parse_string(rest: &str, line: usize) -> Result<StringPayload, AssemblyError> {
    let trimmed = rest.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return Err(AssemblyError::MalformedDirective {
            line,
            reason: "expected a quoted string literal after .string".to_string(),
        });
    }
    let text = &trimmed[1..trimmed.len() - 1];
    Ok(StringPayload {
        text: text.to_string(),
    })
}

pub fn parse_label_reference(rest: &str, directive_name: &str, line: usize) -> Result<String, AssemblyError> {
    let (word, after) = extract_first_word(rest.trim_start());
    if word.is_empty() {
        return Err(AssemblyError::MissingOperand {
            line,
            reason: format!("{} requires a label name", directive_name),
        });
    }
    if !is_valid_label_syntax(word) {
        return Err(AssemblyError::LabelSyntax {
            line,
            reason: format!("'{}' is not a valid label name", word),
        });
    }
    if !after.trim().is_empty() {
        return Err(AssemblyError::RedundantValue {
            line,
            reason: format!("unexpected content after {} operand", directive_name),
        });
    }
    Ok(word.to_string())
}
