//! Opcode table construction errors.

use thiserror::Error;

use crate::String;
use crate::opcodes::OperandCategory;

/// Errors raised while assembling or loading an [`OpcodeTable`](super::OpcodeTable).
///
/// A table that fails validation is never handed to the decoder, so decoding
/// can rely on every code having a single category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("opcode {code} is defined twice ({first} and {second})")]
    DuplicateOpcode {
        code: u8,
        first: String,
        second: String,
    },

    #[error("mnemonic {name} is defined twice (codes {first} and {second})")]
    DuplicateName { name: String, first: u8, second: u8 },

    #[error(
        "{name} ({code}) takes a {category} operand but is below the argument threshold {have_argument}"
    )]
    OperandBelowThreshold {
        name: String,
        code: u8,
        category: OperandCategory,
        have_argument: u8,
    },

    #[error("no extended-argument opcode is defined")]
    MissingExtendedArg,

    #[error("extended-argument opcode {code} is not defined")]
    UndefinedExtendedArg { code: u8 },

    /// The extended-argument opcode must not also be a jump or a reference.
    #[error("extended-argument opcode {name} ({code}) has category {category}, expected plain")]
    ExtendedArgWithCategory {
        name: String,
        code: u8,
        category: OperandCategory,
    },

    #[error("extended-argument opcode {code} is below the argument threshold {have_argument}")]
    ExtendedArgWithoutOperand { code: u8, have_argument: u8 },

    /// The serialized form could not be read.
    #[error("malformed opcode table encoding: {0}")]
    Encoding(String),
}
