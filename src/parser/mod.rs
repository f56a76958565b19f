//! Line parser (spec.md §4.4): recognizes directive vs command vs
//! label-definition vs empty/comment, and builds one
//! `AbstractLineDescriptor` per source line.

mod command;
mod directive;

use crate::ast::{AbstractLineDescriptor, LineKind};
use crate::errors::AssemblyError;
use crate::lexer::{extract_first_word, is_valid_label_syntax, MAX_LINE_LEN};
use crate::opcode_table::{self, Arity};

/// A parsed line plus an optional non-fatal warning (spec.md §4.4 step 2:
/// a label on `.entry`/`.extern` is accepted but ignored).
pub struct ParsedLine {
    pub descriptor: AbstractLineDescriptor,
    pub warning: Option<String>,
}

fn err_to_line(line_descriptor: &mut AbstractLineDescriptor, err: AssemblyError) {
    line_descriptor.kind = LineKind::Empty;
    line_descriptor.error = Some(err);
}

pub fn parse_line(text: &str, line_number: usize) -> ParsedLine {
    let mut descriptor = AbstractLineDescriptor {
        line_number,
        label: None,
        kind: LineKind::Empty,
        error: None,
    };
    let mut warning = None;

    if text.len() > MAX_LINE_LEN {
        err_to_line(
            &mut descriptor,
            AssemblyError::LineTooLong {
                line: line_number,
                max: MAX_LINE_LEN,
            },
        );
        return ParsedLine { descriptor, warning };
    }

    let trimmed = text.trim_start();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return ParsedLine { descriptor, warning };
    }

    let mut rest = trimmed;
    let (first_word, after_first) = extract_first_word(rest);
    if let Some(label_candidate) = first_word.strip_suffix(':') {
        if !is_valid_label_syntax(label_candidate) {
            err_to_line(
                &mut descriptor,
                AssemblyError::LabelSyntax {
                    line: line_number,
                    reason: format!("'{}' is not a valid label name", label_candidate),
                },
            );
            return ParsedLine { descriptor, warning };
        }
        descriptor.label = Some(label_candidate.to_string());
        rest = after_first.trim_start();
    }

    if rest.is_empty() {
        return ParsedLine { descriptor, warning };
    }

    let (token, after_token) = extract_first_word(rest);
    let lower = token.to_ascii_lowercase();

    let result: Result<LineKind, AssemblyError> = match lower.as_str() {
        ".define" => {
            if descriptor.label.is_some() {
                Err(AssemblyError::MalformedDirective {
                    line: line_number,
                    reason: "a label prefix is not allowed on a .define line".to_string(),
                })
            } else {
                directive::parse_define(after_token, line_number).map(LineKind::ConstantDefinition)
            }
        }
        ".data" => directive::parse_data(after_token, line_number).map(LineKind::DataDirective),
        ".string" => {
            directive::parse_string(after_token, line_number).map(LineKind::StringDirective)
        }
        ".entry" => {
            if descriptor.label.is_some() {
                warning = Some(format!(
                    "line {}: label on .entry line is ignored",
                    line_number
                ));
                descriptor.label = None;
            }
            directive::parse_label_reference(after_token, ".entry", line_number)
                .map(LineKind::EntryDirective)
        }
        ".extern" => {
            if descriptor.label.is_some() {
                warning = Some(format!(
                    "line {}: label on .extern line is ignored",
                    line_number
                ));
                descriptor.label = None;
            }
            directive::parse_label_reference(after_token, ".extern", line_number)
                .map(LineKind::ExternDirective)
        }
        _ => match opcode_table::lookup_mnemonic(token) {
            Some(opcode) => {
                let payload = match opcode_table::arity(opcode) {
                    Arity::Two => command::parse_two_operand(opcode, after_token, line_number),
                    Arity::One => command::parse_one_operand(opcode, after_token, line_number),
                    Arity::None => command::parse_no_operand(opcode, after_token, line_number),
                };
                payload.map(LineKind::Command)
            }
            None => Err(AssemblyError::OpcodeFormat {
                line: line_number,
                reason: format!("'{}' is not a recognized opcode or directive", token),
            }),
        },
    };

    match result {
        Ok(kind) => descriptor.kind = kind,
        Err(err) => err_to_line(&mut descriptor, err),
    }

    ParsedLine { descriptor, warning }
}

pub fn parse_program(source: &str) -> (Vec<AbstractLineDescriptor>, Vec<String>) {
    let mut lines = Vec::new();
    let mut warnings = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        let ParsedLine { descriptor, warning } = parse_line(text, idx + 1);
        if let Some(w) = warning {
            warnings.push(w);
        }
        lines.push(descriptor);
    }
    (lines, warnings)
}
