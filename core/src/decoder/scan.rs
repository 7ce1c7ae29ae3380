//! Instruction boundary scanner shared by both decoding passes.

use core::iter::FusedIterator;

use crate::decoder::DecodeError;
use crate::opcodes::OpcodeTable;

/// Multiplier applied to an extended argument before it is added to the next
/// operand (a 16-bit shift).
pub(crate) const EXTENDED_ARG_SHIFT: u64 = 65536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawOperand {
    /// The two operand bytes as stored, low byte first.
    pub bytes: [u8; 2],
    /// `bytes` as little-endian u16 plus any pending extension.
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawInstruction {
    pub offset: usize,
    pub opcode: u8,
    pub operand: Option<RawOperand>,
}

impl RawInstruction {
    /// Offset just past this instruction.
    pub fn end(&self) -> usize {
        self.offset + if self.operand.is_some() { 3 } else { 1 }
    }
}

/// Splits a byte stream into instructions and folds extended arguments into
/// the operand that follows them.
///
/// The extension is consumed by exactly one instruction; an extended-argument
/// instruction then sets it again from its own combined operand.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    code: &'a [u8],
    table: &'a OpcodeTable,
    pos: usize,
    extended_bits: u64,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(code: &'a [u8], table: &'a OpcodeTable) -> Self {
        Scanner {
            code,
            table,
            pos: 0,
            extended_bits: 0,
            failed: false,
        }
    }

    pub fn code(&self) -> &'a [u8] {
        self.code
    }

    fn read(&mut self) -> Option<Result<RawInstruction, DecodeError>> {
        let offset = self.pos;
        let opcode = *self.code.get(offset)?;

        if !self.table.has_argument(opcode) {
            self.pos += 1;
            return Some(Ok(RawInstruction {
                offset,
                opcode,
                operand: None,
            }));
        }

        let Some(&[lo, hi]) = self.code.get(offset + 1..offset + 3) else {
            return Some(Err(DecodeError::Truncated {
                offset,
                opcode,
                available: self.code.len() - offset - 1,
            }));
        };

        let pending = core::mem::take(&mut self.extended_bits);
        let Some(value) = u64::from(u16::from_le_bytes([lo, hi])).checked_add(pending) else {
            return Some(Err(DecodeError::OperandOverflow { offset }));
        };

        if opcode == self.table.extended_arg() {
            match value.checked_mul(EXTENDED_ARG_SHIFT) {
                Some(bits) => self.extended_bits = bits,
                None => return Some(Err(DecodeError::OperandOverflow { offset })),
            }
        }

        self.pos = offset + 3;
        Some(Ok(RawInstruction {
            offset,
            opcode,
            operand: Some(RawOperand {
                bytes: [lo, hi],
                value,
            }),
        }))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<RawInstruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.read();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl FusedIterator for Scanner<'_> {}
