use core::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::opcodes::{OperandCategory, TableError};
use crate::{String, ToString, Vec, format};

/// Number of distinct single-byte opcodes.
const OPCODE_SPACE: usize = 256;

/// One opcode definition: mnemonic, numeric code and operand category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodeDef {
    pub name: String,
    pub code: u8,
    #[serde(default)]
    pub category: OperandCategory,
}

/// The instruction set of one runtime version.
///
/// Built once per version and shared by any number of decode calls. The
/// category of every code is resolved at construction time, so the decoder
/// does one array lookup per instruction instead of probing several sets.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "super::TableDescriptor", into = "super::TableDescriptor")]
pub struct OpcodeTable {
    version: String,
    /// Mnemonic per code; undefined codes read `<N>`.
    opnames: Vec<String>,
    opmap: HashMap<String, u8>,
    categories: [OperandCategory; OPCODE_SPACE],
    have_argument: u8,
    extended_arg: u8,
    compare_ops: Vec<String>,
}

impl OpcodeTable {
    /// Start a table for the given runtime version label (e.g. `"3.5"`).
    pub fn builder(version: impl Into<String>) -> OpcodeTableBuilder {
        OpcodeTableBuilder {
            version: version.into(),
            have_argument: 0,
            extended_arg: None,
            compare_ops: Vec::new(),
            defs: Vec::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn mnemonic(&self, opcode: u8) -> &str {
        &self.opnames[usize::from(opcode)]
    }

    /// Look up a code by mnemonic. Only defined opcodes are found.
    pub fn opcode(&self, mnemonic: &str) -> Option<u8> {
        self.opmap.get(mnemonic).copied()
    }

    pub fn category(&self, opcode: u8) -> OperandCategory {
        self.categories[usize::from(opcode)]
    }

    /// Smallest code that carries a two-byte operand.
    pub fn have_argument(&self) -> u8 {
        self.have_argument
    }

    pub fn has_argument(&self, opcode: u8) -> bool {
        opcode >= self.have_argument
    }

    pub fn extended_arg(&self) -> u8 {
        self.extended_arg
    }

    pub fn compare_ops(&self) -> &[String] {
        &self.compare_ops
    }

    /// Codes belonging to a category, in ascending order.
    ///
    /// This is the set view (`hasconst`, `hasjrel`, ...) over the tag array.
    pub fn uses(&self, category: OperandCategory) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&code| self.category(code) == category)
    }

    /// Defined opcodes in ascending code order.
    pub fn definitions(&self) -> impl Iterator<Item = OpcodeDef> + '_ {
        let mut codes: Vec<u8> = self.opmap.values().copied().collect();
        codes.sort_unstable();
        codes.into_iter().map(move |code| OpcodeDef {
            name: self.mnemonic(code).to_string(),
            code,
            category: self.category(code),
        })
    }

    pub fn len(&self) -> usize {
        self.opmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opmap.is_empty()
    }
}

impl fmt::Debug for OpcodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OpcodeTable {{")?;
        writeln!(f, "  version: {}", self.version)?;
        writeln!(f, "  have_argument: {}", self.have_argument)?;
        writeln!(
            f,
            "  extended_arg: {} ({})",
            self.extended_arg,
            self.mnemonic(self.extended_arg)
        )?;
        writeln!(f, "  compare_ops: {:?}", self.compare_ops)?;
        writeln!(f, "  opcodes: [")?;
        for def in self.definitions() {
            match def.category {
                OperandCategory::Plain => writeln!(f, "    {:3} {}", def.code, def.name)?,
                category => writeln!(f, "    {:3} {} ({})", def.code, def.name, category)?,
            }
        }
        writeln!(f, "  ]")?;
        write!(f, "}}")
    }
}

/// Incremental construction of an [`OpcodeTable`].
///
/// The method names follow the usual way opcode modules are written: one call
/// per instruction, with the call choosing the operand category.
///
/// ```
/// use crossdis_core::opcodes::{OpcodeTable, OperandCategory};
///
/// let table = OpcodeTable::builder("toy")
///     .have_argument(90)
///     .def_op("RETURN_VALUE", 83)
///     .const_op("LOAD_CONST", 100)
///     .jrel_op("JUMP_FORWARD", 110)
///     .extended_arg("EXTENDED_ARG", 144)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.category(110), OperandCategory::RelativeJump);
/// assert_eq!(table.mnemonic(7), "<7>");
/// ```
#[derive(Debug, Clone)]
pub struct OpcodeTableBuilder {
    version: String,
    have_argument: u8,
    extended_arg: Option<u8>,
    compare_ops: Vec<String>,
    defs: Vec<OpcodeDef>,
}

impl OpcodeTableBuilder {
    pub fn have_argument(mut self, threshold: u8) -> Self {
        self.have_argument = threshold;
        self
    }

    pub fn compare_ops<S: AsRef<str>>(mut self, ops: &[S]) -> Self {
        self.compare_ops = ops.iter().map(|op| op.as_ref().to_string()).collect();
        self
    }

    pub fn op(mut self, name: &str, code: u8, category: OperandCategory) -> Self {
        self.defs.push(OpcodeDef {
            name: name.to_string(),
            code,
            category,
        });
        self
    }

    /// Define the extended-argument opcode.
    pub fn extended_arg(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Plain).extended_arg_code(code)
    }

    /// Mark a code as the extended-argument opcode. The code must also be
    /// defined, with the plain category, by the time [`build`](Self::build)
    /// runs.
    pub fn extended_arg_code(mut self, code: u8) -> Self {
        self.extended_arg = Some(code);
        self
    }

    pub fn def_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Plain)
    }

    pub fn name_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Name)
    }

    pub fn jrel_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::RelativeJump)
    }

    pub fn jabs_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::AbsoluteJump)
    }

    pub fn local_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Local)
    }

    pub fn const_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Const)
    }

    pub fn compare_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Compare)
    }

    pub fn free_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::Free)
    }

    pub fn nargs_op(self, name: &str, code: u8) -> Self {
        self.op(name, code, OperandCategory::VariadicCall)
    }

    /// Validate the definitions and freeze them into a table.
    pub fn build(self) -> Result<OpcodeTable, TableError> {
        let mut opnames: Vec<String> = (0..OPCODE_SPACE)
            .map(|code| format!("<{}>", code))
            .collect();
        let mut owners: [Option<usize>; OPCODE_SPACE] = [None; OPCODE_SPACE];
        let mut categories = [OperandCategory::Plain; OPCODE_SPACE];
        let mut opmap: HashMap<String, u8> = HashMap::with_capacity(self.defs.len());

        for (index, def) in self.defs.iter().enumerate() {
            let slot = usize::from(def.code);
            if let Some(first) = owners[slot] {
                return Err(TableError::DuplicateOpcode {
                    code: def.code,
                    first: self.defs[first].name.clone(),
                    second: def.name.clone(),
                });
            }
            if let Some(&first) = opmap.get(def.name.as_str()) {
                return Err(TableError::DuplicateName {
                    name: def.name.clone(),
                    first,
                    second: def.code,
                });
            }
            if def.category != OperandCategory::Plain && def.code < self.have_argument {
                return Err(TableError::OperandBelowThreshold {
                    name: def.name.clone(),
                    code: def.code,
                    category: def.category,
                    have_argument: self.have_argument,
                });
            }

            owners[slot] = Some(index);
            opnames[slot] = def.name.clone();
            categories[slot] = def.category;
            opmap.insert(def.name.clone(), def.code);
        }

        let extended_arg = self.extended_arg.ok_or(TableError::MissingExtendedArg)?;
        let slot = usize::from(extended_arg);
        if owners[slot].is_none() {
            return Err(TableError::UndefinedExtendedArg { code: extended_arg });
        }
        if categories[slot] != OperandCategory::Plain {
            return Err(TableError::ExtendedArgWithCategory {
                name: opnames[slot].clone(),
                code: extended_arg,
                category: categories[slot],
            });
        }
        if extended_arg < self.have_argument {
            return Err(TableError::ExtendedArgWithoutOperand {
                code: extended_arg,
                have_argument: self.have_argument,
            });
        }

        Ok(OpcodeTable {
            version: self.version,
            opnames,
            opmap,
            categories,
            have_argument: self.have_argument,
            extended_arg,
            compare_ops: self.compare_ops,
        })
    }
}
