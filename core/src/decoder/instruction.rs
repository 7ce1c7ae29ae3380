use core::fmt;

use crate::String;
use crate::code::Constant;

/// An operand after category-specific resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandValue {
    /// The operand itself: no symbol table was supplied for its category, or
    /// the category has none.
    Raw(u64),
    Const(Constant),
    /// A name from the names, local or cell/free table.
    Name(String),
    /// Absolute byte offset a jump lands on.
    Target(u64),
    Compare(String),
}

impl fmt::Display for OperandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandValue::Raw(value) | OperandValue::Target(value) => write!(f, "{}", value),
            OperandValue::Const(constant) => write!(f, "{}", constant),
            OperandValue::Name(name) | OperandValue::Compare(name) => f.write_str(name),
        }
    }
}

/// Details for one bytecode operation.
///
/// Owns all of its data; nothing refers back to the byte stream or the tables
/// it was decoded with.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub mnemonic: String,
    pub opcode: u8,
    /// Operand with any extended argument folded in; `None` below the
    /// argument threshold.
    pub raw_operand: Option<u64>,
    pub resolved_value: Option<OperandValue>,
    /// Human readable description of the operand, possibly empty.
    pub display_operand: String,
    /// Start of the instruction within the byte stream.
    pub offset: usize,
    /// Line started by this instruction, if any.
    pub source_line: Option<i64>,
    /// True if some jump in the same stream lands here.
    pub is_jump_target: bool,
}

impl Instruction {
    /// Encoded size in bytes: 1, or 3 with an operand.
    pub fn size(&self) -> usize {
        if self.raw_operand.is_some() { 3 } else { 1 }
    }

    /// Offset of the following instruction.
    pub fn end(&self) -> usize {
        self.offset + self.size()
    }
}
