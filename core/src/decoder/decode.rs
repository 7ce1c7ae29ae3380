use core::iter::FusedIterator;

use tracing::debug;

use crate::code::{Constant, LineStarts};
use crate::decoder::labels::{JumpTargets, find_jump_targets, jump_target};
use crate::decoder::scan::{RawInstruction, RawOperand, Scanner};
use crate::decoder::{DecodeError, Instruction, OperandValue};
use crate::opcodes::{OpcodeTable, OperandCategory};
use crate::{String, ToString, format};

/// The runtime environment of a byte stream: everything operands can refer to.
///
/// A table left as `None` makes its category resolve to the raw index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolTables<'a> {
    pub constants: Option<&'a [Constant]>,
    pub names: Option<&'a [String]>,
    pub varnames: Option<&'a [String]>,
    /// Cell variables followed by free variables.
    pub cells: Option<&'a [String]>,
    pub line_starts: Option<&'a LineStarts>,
    /// Added to every line number taken from `line_starts`, saturating.
    pub line_offset: i64,
}

/// Decode a byte stream into instructions.
///
/// The returned iterator is lazy: nothing is scanned until the first call to
/// `next`, which runs the jump-target pass over the whole stream before the
/// first instruction is produced. It is forward-only; decode again to start
/// over. The first error ends the sequence.
pub fn decode<'a>(
    code: &'a [u8],
    table: &'a OpcodeTable,
    symbols: SymbolTables<'a>,
) -> Instructions<'a> {
    Instructions {
        scanner: Scanner::new(code, table),
        table,
        symbols,
        targets: None,
        done: false,
    }
}

/// Iterator over decoded instructions, see [`decode`].
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    scanner: Scanner<'a>,
    table: &'a OpcodeTable,
    symbols: SymbolTables<'a>,
    targets: Option<JumpTargets>,
    done: bool,
}

impl Instructions<'_> {
    fn step(&mut self) -> Option<Result<Instruction, DecodeError>> {
        if self.targets.is_none() {
            let code = self.scanner.code();
            match find_jump_targets(code, self.table) {
                Ok(targets) => {
                    debug!(
                        version = self.table.version(),
                        len = code.len(),
                        jump_targets = targets.len(),
                        "decoding bytecode"
                    );
                    self.targets = Some(targets);
                }
                Err(err) => return Some(Err(err)),
            }
        }

        match self.scanner.next()? {
            Ok(raw) => Some(self.assemble(raw)),
            Err(err) => Some(Err(err)),
        }
    }

    fn assemble(&self, raw: RawInstruction) -> Result<Instruction, DecodeError> {
        let source_line = self
            .symbols
            .line_starts
            .and_then(|starts| starts.get(&raw.offset))
            .map(|line| line.saturating_add(self.symbols.line_offset));
        let is_jump_target = self
            .targets
            .as_ref()
            .is_some_and(|targets| targets.contains(&(raw.offset as u64)));

        let (raw_operand, resolved_value, display_operand) = match raw.operand {
            Some(operand) => {
                let (value, display) = self.resolve(&raw, operand)?;
                (Some(operand.value), Some(value), display)
            }
            None => (None, None, String::new()),
        };

        Ok(Instruction {
            mnemonic: self.table.mnemonic(raw.opcode).to_string(),
            opcode: raw.opcode,
            raw_operand,
            resolved_value,
            display_operand,
            offset: raw.offset,
            source_line,
            is_jump_target,
        })
    }

    /// Resolve an operand by the opcode's category.
    fn resolve(
        &self,
        raw: &RawInstruction,
        operand: RawOperand,
    ) -> Result<(OperandValue, String), DecodeError> {
        let index = operand.value;
        if raw.opcode == self.table.extended_arg() {
            return Ok((OperandValue::Raw(index), String::new()));
        }

        let category = self.table.category(raw.opcode);
        match category {
            OperandCategory::Const => match self.symbols.constants {
                Some(constants) => {
                    let constant = lookup(constants, index, raw.offset, category)?;
                    Ok((OperandValue::Const(constant.clone()), constant.repr()))
                }
                None => Ok((OperandValue::Raw(index), index.to_string())),
            },
            OperandCategory::Name => name_info(self.symbols.names, index, raw.offset, category),
            OperandCategory::RelativeJump => {
                let target = jump_target(raw, self.table)?.unwrap_or(index);
                Ok((OperandValue::Target(target), format!("to {}", target)))
            }
            OperandCategory::AbsoluteJump => Ok((OperandValue::Target(index), String::new())),
            OperandCategory::Local => {
                name_info(self.symbols.varnames, index, raw.offset, category)
            }
            OperandCategory::Compare => {
                let op = lookup(self.table.compare_ops(), index, raw.offset, category)?;
                Ok((OperandValue::Compare(op.clone()), op.clone()))
            }
            OperandCategory::Free => name_info(self.symbols.cells, index, raw.offset, category),
            OperandCategory::VariadicCall => {
                let [positional, keyword] = operand.bytes;
                Ok((
                    OperandValue::Raw(index),
                    format!("{} positional, {} keyword pair", positional, keyword),
                ))
            }
            OperandCategory::Plain => Ok((OperandValue::Raw(index), String::new())),
        }
    }
}

impl Iterator for Instructions<'_> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.step();
        match &item {
            None => self.done = true,
            Some(Err(err)) => {
                debug!(%err, offset = err.offset(), "decode aborted");
                self.done = true;
            }
            Some(Ok(_)) => {}
        }
        item
    }
}

impl FusedIterator for Instructions<'_> {}

fn lookup<'t, T>(
    table: &'t [T],
    index: u64,
    offset: usize,
    category: OperandCategory,
) -> Result<&'t T, DecodeError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i))
        .ok_or(DecodeError::OutOfRange {
            offset,
            category,
            index,
            len: table.len(),
        })
}

/// Dereference a name when its table is known, otherwise fall back to the
/// index.
fn name_info(
    names: Option<&[String]>,
    index: u64,
    offset: usize,
    category: OperandCategory,
) -> Result<(OperandValue, String), DecodeError> {
    match names {
        Some(names) => {
            let name = lookup(names, index, offset, category)?;
            Ok((OperandValue::Name(name.clone()), name.clone()))
        }
        None => Ok((OperandValue::Raw(index), index.to_string())),
    }
}
