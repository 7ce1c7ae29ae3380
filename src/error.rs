//! Public error type for the crossdis API.
//!
//! Core errors (decoding, table validation) are wrapped as they are; the
//! diagnostic codes let the CLI point at the failing stage.

use crossdis_core::{DecodeError, TableError};
use miette::Diagnostic;
use thiserror::Error;

use crate::SUPPORTED_VERSIONS;

/// Errors raised by table selection, decoding and listing.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The byte stream is malformed or refers outside its tables.
    #[error(transparent)]
    #[diagnostic(
        code(crossdis::decode),
        help("check that the opcode table matches the version that produced the code")
    )]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    #[diagnostic(code(crossdis::table))]
    Table(#[from] TableError),

    #[error("no built-in opcode table for version {0:?}")]
    #[diagnostic(code(crossdis::unknown_version), help("{}", supported_versions()))]
    UnknownVersion(String),

    #[error("failed to write listing")]
    #[diagnostic(code(crossdis::io))]
    Io(#[from] std::io::Error),
}

fn supported_versions() -> String {
    format!("built-in versions: {}", SUPPORTED_VERSIONS.join(", "))
}
