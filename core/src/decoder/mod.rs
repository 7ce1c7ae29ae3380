//! Bytecode decoding.
//!
//! Decoding is two forward scans over the same bytes:
//!
//! 1. [`find_jump_targets`] collects every offset some jump lands on.
//! 2. [`decode`] walks the stream again and builds one [`Instruction`] per
//!    instruction boundary, resolving operands against the [`SymbolTables`]
//!    and marking jump targets from the first pass.
//!
//! # Encoding
//!
//! ```text
//! ┌──────────┐                      code <  have_argument
//! │  opcode  │
//! └──────────┘
//! ┌──────────┬──────────┬──────────┐ code >= have_argument
//! │  opcode  │  lo byte │  hi byte │
//! └──────────┴──────────┴──────────┘
//! ```
//!
//! An extended-argument instruction contributes `operand * 65536` to the
//! operand of the instruction right after it:
//!
//! ```ignore
//! EXTENDED_ARG 1      // pending = 1 * 65536
//! LOAD_CONST   2      // operand = 65536 + 2 = 65538
//! ```

mod decode;
mod error;
mod instruction;
mod labels;
mod scan;


pub use decode::{Instructions, SymbolTables, decode};
pub use error::DecodeError;
pub use instruction::{Instruction, OperandValue};
pub use labels::{JumpTargets, find_jump_targets};
