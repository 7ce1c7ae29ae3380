//! Decoding errors.
//!
//! Every error is terminal for the decode call that raised it: the instruction
//! sequence yields the error once and then ends.

use thiserror::Error;

use crate::opcodes::OperandCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The stream ends inside an operand field.
    #[error(
        "truncated instruction at offset {offset}: opcode {opcode} needs a 2-byte operand but {available} byte(s) remain"
    )]
    Truncated {
        offset: usize,
        opcode: u8,
        available: usize,
    },

    /// An operand indexes past the end of its symbol table.
    #[error("{category} index {index} at offset {offset} is out of range (table has {len} entries)")]
    OutOfRange {
        offset: usize,
        category: OperandCategory,
        index: u64,
        len: usize,
    },

    /// Chained extended arguments pushed an operand past 64 bits.
    #[error("operand at offset {offset} overflows 64 bits")]
    OperandOverflow { offset: usize },
}

impl DecodeError {
    /// Offset of the instruction the error was raised for.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::Truncated { offset, .. }
            | DecodeError::OutOfRange { offset, .. }
            | DecodeError::OperandOverflow { offset } => *offset,
        }
    }

    /// Whether the stream itself is malformed, as opposed to a bad reference.
    pub fn is_malformed_stream(&self) -> bool {
        matches!(
            self,
            DecodeError::Truncated { .. } | DecodeError::OperandOverflow { .. }
        )
    }
}
