use hashbrown::HashSet;
use tracing::trace;

use crate::decoder::DecodeError;
use crate::decoder::scan::{RawInstruction, Scanner};
use crate::opcodes::{OpcodeTable, OperandCategory};

/// Byte offsets that some jump in the stream lands on.
pub type JumpTargets = HashSet<u64>;

/// Detect all offsets in a byte stream which are jump targets.
///
/// Targets are collected in a set, so the result does not depend on which
/// jump is seen first. Targets that fall between instruction boundaries, or
/// past the end of the stream, are kept as they are.
pub fn find_jump_targets(code: &[u8], table: &OpcodeTable) -> Result<JumpTargets, DecodeError> {
    let mut targets = JumpTargets::new();
    for raw in Scanner::new(code, table) {
        if let Some(target) = jump_target(&raw?, table)? {
            targets.insert(target);
        }
    }
    trace!(count = targets.len(), "collected jump targets");
    Ok(targets)
}

/// Where a jump instruction lands, or `None` for any other instruction.
///
/// Relative jumps count from the end of the instruction.
pub(crate) fn jump_target(
    raw: &RawInstruction,
    table: &OpcodeTable,
) -> Result<Option<u64>, DecodeError> {
    let Some(operand) = raw.operand else {
        return Ok(None);
    };
    if raw.opcode == table.extended_arg() {
        return Ok(None);
    }

    match table.category(raw.opcode) {
        OperandCategory::RelativeJump => (raw.end() as u64)
            .checked_add(operand.value)
            .map(Some)
            .ok_or(DecodeError::OperandOverflow { offset: raw.offset }),
        OperandCategory::AbsoluteJump => Ok(Some(operand.value)),
        _ => Ok(None),
    }
}
