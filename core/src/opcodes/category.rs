use core::fmt;

use serde::{Deserialize, Serialize};

/// How an opcode's operand is interpreted.
///
/// Every opcode has exactly one category. Opcodes without an operand, and
/// opcodes whose operand is a plain count, are [`OperandCategory::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandCategory {
    /// No symbol table involved; the operand (if any) is its own value.
    #[default]
    Plain,
    /// Index into the constant pool.
    Const,
    /// Index into the names table (globals, attributes, imports).
    Name,
    /// Forward distance measured from the end of the instruction.
    RelativeJump,
    /// Byte offset from the start of the stream.
    AbsoluteJump,
    /// Index into the local variable names.
    Local,
    /// Index into the comparison-operator table.
    Compare,
    /// Index into the cell variables followed by the free variables.
    Free,
    /// Low byte is the positional argument count, high byte the keyword pair count.
    VariadicCall,
}

impl OperandCategory {
    pub const ALL: [OperandCategory; 9] = [
        OperandCategory::Plain,
        OperandCategory::Const,
        OperandCategory::Name,
        OperandCategory::RelativeJump,
        OperandCategory::AbsoluteJump,
        OperandCategory::Local,
        OperandCategory::Compare,
        OperandCategory::Free,
        OperandCategory::VariadicCall,
    ];

    pub fn is_jump(self) -> bool {
        matches!(
            self,
            OperandCategory::RelativeJump | OperandCategory::AbsoluteJump
        )
    }
}

impl fmt::Display for OperandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OperandCategory::Plain => "plain",
            OperandCategory::Const => "constant",
            OperandCategory::Name => "name",
            OperandCategory::RelativeJump => "relative jump",
            OperandCategory::AbsoluteJump => "absolute jump",
            OperandCategory::Local => "local variable",
            OperandCategory::Compare => "comparison operator",
            OperandCategory::Free => "cell/free variable",
            OperandCategory::VariadicCall => "call argument count",
        };
        f.write_str(text)
    }
}
