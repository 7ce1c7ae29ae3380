//! Per-version opcode tables.
//!
//! An [`OpcodeTable`] describes one runtime version's instruction set as plain
//! data: mnemonics, the argument threshold, the extended-argument opcode, the
//! comparison-operator strings, and the operand category of every opcode. The
//! decoder is version-agnostic and takes the table as a parameter.
//!
//! Tables are assembled with [`OpcodeTable::builder`], loaded from their
//! serialized form (see [`TableDescriptor`]), or taken from the built-in
//! definitions for CPython [`python27`], [`python34`] and [`python35`].

mod category;
mod error;
mod python2;
mod python3;
mod serialization;
mod table;

#[cfg(test)]
mod table_test;

pub use category::OperandCategory;
pub use error::TableError;
pub use python2::python27;
pub use python3::{python34, python35};
pub use serialization::TableDescriptor;
pub use table::{OpcodeDef, OpcodeTable, OpcodeTableBuilder};

/// Comparison operators shared by every CPython 2.x and 3.x release before 3.9.
pub const CMP_OP: &[&str] = &[
    "<",
    "<=",
    "==",
    "!=",
    ">",
    ">=",
    "in",
    "not in",
    "is",
    "is not",
    "exception match",
    "BAD",
];
