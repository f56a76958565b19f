//! The parser's typed representation of one source line (spec.md §3) and
//! the symbol/constant table entry types built from it.

use crate::errors::AssemblyError;
use crate::opcode_table::{AddressingKind, Opcode};

/// Either a literal integer or a `.define` name to resolve later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntOrConstant {
    Literal(i32),
    Constant(String),
}

/// One operand, already classified by the addressing recognizer
/// (spec.md §4.2). `None` stands for an absent operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressingType {
    Immediate(IntOrConstant),
    Direct { label: String },
    FixedIndex { label: String, index: IntOrConstant },
    DirectRegister { reg: u8 },
    None,
}

impl AddressingType {
    pub fn kind(&self) -> Option<AddressingKind> {
        match self {
            AddressingType::Immediate(_) => Some(AddressingKind::Immediate),
            AddressingType::Direct { .. } => Some(AddressingKind::Direct),
            AddressingType::FixedIndex { .. } => Some(AddressingKind::FixedIndex),
            AddressingType::DirectRegister { .. } => Some(AddressingKind::DirectRegister),
            AddressingType::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPayload {
    pub opcode: Opcode,
    pub src_operand: AddressingType,
    pub dst_operand: AddressingType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDefPayload {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPayload {
    pub values: Vec<IntOrConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringPayload {
    pub text: String,
}

/// Per-line payload, keyed by line kind (spec.md §3 table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    ConstantDefinition(ConstantDefPayload),
    DataDirective(DataPayload),
    StringDirective(StringPayload),
    EntryDirective(String),
    ExternDirective(String),
    Command(CommandPayload),
}

/// One per source line, regardless of whether it parsed cleanly: an
/// erroneous line still occupies its slot so address math in pass 1
/// stays consistent (spec.md §3).
#[derive(Debug, Clone)]
pub struct AbstractLineDescriptor {
    pub line_number: usize,
    pub label: Option<String>,
    pub kind: LineKind,
    pub error: Option<AssemblyError>,
}

impl AbstractLineDescriptor {
    pub fn is_erroneous(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    CodeLabel,
    DataLabel,
    ExternLabel,
    EntryCodeLabel,
    EntryDataLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: u16,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: i32,
}
