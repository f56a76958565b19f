use thiserror::Error;

/// Every recoverable error the assembler can produce against a single
/// input file, tagged with the source line it was found on (0 for
/// file-level errors that are not tied to one line, e.g. I/O).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("line {line}: label syntax error: {reason}")]
    LabelSyntax { line: usize, reason: String },

    #[error("line {line}: unrecognized opcode or directive: {reason}")]
    OpcodeFormat { line: usize, reason: String },

    #[error("line {line}: malformed operand: {reason}")]
    OperandFormat { line: usize, reason: String },

    #[error("line {line}: missing operand: {reason}")]
    MissingOperand { line: usize, reason: String },

    #[error("line {line}: missing comma between operands")]
    MissingComma { line: usize },

    #[error("line {line}: extraneous comma: {reason}")]
    ExtraneousComma { line: usize, reason: String },

    #[error("line {line}: unexpected trailing content: {reason}")]
    RedundantValue { line: usize, reason: String },

    #[error("line {line}: malformed directive: {reason}")]
    MalformedDirective { line: usize, reason: String },

    #[error("line {line}: line exceeds the maximum of {max} characters")]
    LineTooLong { line: usize, max: usize },

    #[error("line {line}: addressing mode not allowed for this opcode: {reason}")]
    UnknownAddressingForOpcode { line: usize, reason: String },

    #[error("line {line}: duplicate symbol definition: {name}")]
    DuplicateSymbol { line: usize, name: String },

    #[error("line {line}: '{name}' collides with a reserved word")]
    NameCollidesReserved { line: usize, name: String },

    #[error("line {line}: external label '{name}' cannot be declared as an entry")]
    ExternCannotBeEntry { line: usize, name: String },

    #[error("line {line}: undefined label: {name}")]
    UnfoundLabel { line: usize, name: String },

    #[error("line {line}: undefined constant: {name}")]
    UnfoundConst { line: usize, name: String },

    #[error("line {line}: value {value} does not fit in a 12-bit signed field")]
    BitOverflow { line: usize, value: i32 },

    #[error("line {line}: fixed-index offset must not be negative: {value}")]
    NegativeIndex { line: usize, value: i32 },

    #[error("{0}")]
    Io(String),
}

impl AssemblyError {
    /// Source line this error is attached to, or 0 for file-level errors.
    pub fn line(&self) -> usize {
        match self {
            AssemblyError::LabelSyntax { line, .. }
            | AssemblyError::OpcodeFormat { line, .. }
            | AssemblyError::OperandFormat { line, .. }
            | AssemblyError::MissingOperand { line, .. }
            | AssemblyError::MissingComma { line }
            | AssemblyError::ExtraneousComma { line, .. }
            | AssemblyError::RedundantValue { line, .. }
            | AssemblyError::MalformedDirective { line, .. }
            | AssemblyError::LineTooLong { line, .. }
            | AssemblyError::UnknownAddressingForOpcode { line, .. }
            | AssemblyError::DuplicateSymbol { line, .. }
            | AssemblyError::NameCollidesReserved { line, .. }
            | AssemblyError::ExternCannotBeEntry { line, .. }
            | AssemblyError::UnfoundLabel { line, .. }
            | AssemblyError::UnfoundConst { line, .. }
            | AssemblyError::BitOverflow { line, .. }
            | AssemblyError::NegativeIndex { line, .. } => *line,
            AssemblyError::Io(_) => 0,
        }
    }
}
