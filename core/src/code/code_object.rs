use core::fmt;

use serde::{Deserialize, Serialize};

use crate::code::{Constant, LineStarts, line_starts};
use crate::decoder::{self, DecodeError, Instructions, JumpTargets, SymbolTables};
use crate::opcodes::OpcodeTable;
use crate::{String, Vec};

/// Serializable description of one compiled code unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeObject {
    pub name: String,
    pub filename: String,
    /// Line number of the first source line of the unit.
    pub first_line: i64,
    pub code: Vec<u8>,
    pub consts: Vec<Constant>,
    /// Global, attribute and import names.
    pub names: Vec<String>,
    /// Local variable names, arguments first.
    pub varnames: Vec<String>,
    pub cellvars: Vec<String>,
    pub freevars: Vec<String>,
    /// Compact line-number table, see [`line_starts`].
    pub lnotab: Vec<u8>,
}

impl CodeObject {
    /// Cell variables followed by free variables, the table indexed by
    /// cell/free operands.
    pub fn cell_names(&self) -> Vec<String> {
        self.cellvars
            .iter()
            .chain(self.freevars.iter())
            .cloned()
            .collect()
    }

    pub fn line_starts(&self) -> LineStarts {
        line_starts(&self.lnotab, self.first_line)
    }
}

/// The bytecode operations of a code object, decoded with a given table.
///
/// Construction derives the combined cell/free table and the line mapping;
/// every call to [`Bytecode::instructions`] then starts a fresh decode from
/// offset 0.
///
/// ```
/// use crossdis_core::{Bytecode, CodeObject, Constant, opcodes};
///
/// let table = opcodes::python35().unwrap();
/// let code = CodeObject {
///     name: String::from("answer"),
///     first_line: 1,
///     code: vec![100, 1, 0, 83],
///     consts: vec![Constant::None, Constant::Int(42)],
///     ..Default::default()
/// };
///
/// let bytecode = Bytecode::new(&code, &table);
/// let ops: Vec<_> = bytecode.instructions().collect::<Result<_, _>>().unwrap();
/// assert_eq!(ops[0].mnemonic, "LOAD_CONST");
/// assert_eq!(ops[0].display_operand, "42");
/// assert_eq!(ops[1].mnemonic, "RETURN_VALUE");
/// ```
pub struct Bytecode<'a> {
    code: &'a CodeObject,
    table: &'a OpcodeTable,
    first_line: i64,
    line_offset: i64,
    cell_names: Vec<String>,
    line_starts: LineStarts,
}

impl<'a> Bytecode<'a> {
    pub fn new(code: &'a CodeObject, table: &'a OpcodeTable) -> Self {
        Bytecode {
            code,
            table,
            first_line: code.first_line,
            line_offset: 0,
            cell_names: code.cell_names(),
            line_starts: code.line_starts(),
        }
    }

    /// Report source lines as if the unit started at `first_line`.
    ///
    /// Shifted line numbers saturate at the bounds of `i64`.
    pub fn with_first_line(mut self, first_line: i64) -> Self {
        self.first_line = first_line;
        self.line_offset = first_line.saturating_sub(self.code.first_line);
        self
    }

    pub fn first_line(&self) -> i64 {
        self.first_line
    }

    pub fn code(&self) -> &'a CodeObject {
        self.code
    }

    pub fn table(&self) -> &'a OpcodeTable {
        self.table
    }

    pub fn line_starts(&self) -> &LineStarts {
        &self.line_starts
    }

    pub fn symbols(&self) -> SymbolTables<'_> {
        SymbolTables {
            constants: Some(&self.code.consts),
            names: Some(&self.code.names),
            varnames: Some(&self.code.varnames),
            cells: Some(&self.cell_names),
            line_starts: Some(&self.line_starts),
            line_offset: self.line_offset,
        }
    }

    pub fn instructions(&self) -> Instructions<'_> {
        decoder::decode(&self.code.code, self.table, self.symbols())
    }

    pub fn jump_targets(&self) -> Result<JumpTargets, DecodeError> {
        decoder::find_jump_targets(&self.code.code, self.table)
    }
}

impl<'b> IntoIterator for &'b Bytecode<'_> {
    type Item = Result<decoder::Instruction, DecodeError>;
    type IntoIter = Instructions<'b>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions()
    }
}

impl fmt::Debug for Bytecode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bytecode({} [{}], {} bytes)",
            self.code.name,
            self.table.version(),
            self.code.code.len()
        )
    }
}
