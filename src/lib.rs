//! crossdis - a cross-version bytecode disassembler
//!
//! # Overview
//!
//! Bytecode is decoded by a single version-agnostic decoder driven by an
//! [`OpcodeTable`]: the table says which opcodes exist, where operands start,
//! and what each operand refers to. Tables for CPython 2.7, 3.4 and 3.5 are
//! built in; others can be assembled with [`OpcodeTable::builder`] or loaded
//! from their serialized form.
//!
//! # Quick Start
//!
//! ```
//! use crossdis::{Bytecode, CodeObject, Constant, listing, table_for_version};
//!
//! let table = table_for_version("3.5").unwrap();
//! let code = CodeObject {
//!     name: String::from("answer"),
//!     first_line: 1,
//!     code: vec![100, 1, 0, 83],
//!     consts: vec![Constant::None, Constant::Int(42)],
//!     lnotab: vec![0, 1],
//!     ..Default::default()
//! };
//!
//! let bytecode = Bytecode::new(&code, table);
//! let text = listing::render_to_string(&bytecode, &Default::default()).unwrap();
//! assert_eq!(
//!     text,
//!     "  2           0 LOAD_CONST               1 (42)\n              3 RETURN_VALUE\n"
//! );
//! ```

use once_cell::sync::Lazy;
use tracing::debug;

pub mod listing;
mod error;

pub use error::Error;

// Re-export public API from crossdis_core
pub use crossdis_core::code::{self, Bytecode, CodeObject, Constant, LineStarts};
pub use crossdis_core::decoder::{
    self, DecodeError, Instruction, Instructions, JumpTargets, OperandValue, SymbolTables, decode,
    find_jump_targets,
};
pub use crossdis_core::opcodes::{
    self, OpcodeDef, OpcodeTable, OpcodeTableBuilder, OperandCategory, TableDescriptor, TableError,
};

/// Versions accepted by [`table_for_version`].
pub const SUPPORTED_VERSIONS: &[&str] = &["2.7", "3.4", "3.5"];

static PYTHON27: Lazy<Result<OpcodeTable, TableError>> = Lazy::new(opcodes::python27);
static PYTHON34: Lazy<Result<OpcodeTable, TableError>> = Lazy::new(opcodes::python34);
static PYTHON35: Lazy<Result<OpcodeTable, TableError>> = Lazy::new(opcodes::python35);

/// The built-in opcode table for a runtime version such as `"3.5"`.
///
/// Tables are built on first use and shared for the rest of the process.
pub fn table_for_version(version: &str) -> Result<&'static OpcodeTable, Error> {
    let table = match version.trim() {
        "2.7" => &PYTHON27,
        "3.4" => &PYTHON34,
        "3.5" => &PYTHON35,
        other => return Err(Error::UnknownVersion(other.to_string())),
    };
    debug!(version, "selected built-in opcode table");
    table.as_ref().map_err(|err| Error::Table(err.clone()))
}
