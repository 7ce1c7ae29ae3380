#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod code;
pub mod decoder;
pub mod opcodes;

pub use code::{Bytecode, CodeObject, Constant};
pub use decoder::{DecodeError, Instruction, Instructions, OperandValue, SymbolTables, decode};
pub use opcodes::{OpcodeTable, OperandCategory, TableError};
