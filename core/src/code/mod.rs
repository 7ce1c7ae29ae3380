//! Compiled code units and their symbol tables.
//!
//! A [`CodeObject`] describes everything the decoder needs from one compiled
//! unit: the instruction bytes, the constant pool, the name tables and the
//! line-number table. [`Bytecode`] pairs it with an opcode table and prepares
//! the derived tables once.

mod code_object;
mod constant;
mod line_table;

pub use code_object::{Bytecode, CodeObject};
pub use constant::Constant;
pub use line_table::{LineStarts, line_starts};
