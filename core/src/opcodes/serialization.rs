//! Serialized form of opcode tables.
//!
//! Tables travel as a flat [`TableDescriptor`]: a list of definitions plus the
//! scalar settings. Loading goes through [`OpcodeTableBuilder`], so a table
//! read from disk is validated exactly like one assembled in code.

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

use crate::opcodes::{OpcodeDef, OpcodeTable, OpcodeTableBuilder, TableError};
use crate::{String, ToString, Vec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub version: String,
    pub have_argument: u8,
    pub extended_arg: u8,
    #[serde(default)]
    pub compare_ops: Vec<String>,
    pub opcodes: Vec<OpcodeDef>,
}

impl TryFrom<TableDescriptor> for OpcodeTable {
    type Error = TableError;

    fn try_from(descriptor: TableDescriptor) -> Result<Self, Self::Error> {
        let builder: OpcodeTableBuilder = OpcodeTable::builder(descriptor.version)
            .have_argument(descriptor.have_argument)
            .compare_ops(&descriptor.compare_ops)
            .extended_arg_code(descriptor.extended_arg);

        descriptor
            .opcodes
            .iter()
            .fold(builder, |builder, def| {
                builder.op(&def.name, def.code, def.category)
            })
            .build()
    }
}

impl From<OpcodeTable> for TableDescriptor {
    fn from(table: OpcodeTable) -> Self {
        TableDescriptor {
            version: table.version().to_string(),
            have_argument: table.have_argument(),
            extended_arg: table.extended_arg(),
            compare_ops: table.compare_ops().to_vec(),
            opcodes: table.definitions().collect(),
        }
    }
}

impl OpcodeTable {
    /// Encode the table as a compact postcard blob.
    pub fn to_postcard(&self) -> Result<Vec<u8>, TableError> {
        to_allocvec(self).map_err(|err| TableError::Encoding(err.to_string()))
    }

    /// Decode and validate a table produced by [`OpcodeTable::to_postcard`].
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, TableError> {
        let descriptor: TableDescriptor =
            from_bytes(bytes).map_err(|err| TableError::Encoding(err.to_string()))?;
        OpcodeTable::try_from(descriptor)
    }
}
