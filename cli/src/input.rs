//! Reading code objects and opcode tables from disk.

use std::fs;
use std::path::Path;

use crossdis::{CodeObject, OpcodeTable};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

/// On-disk encoding of an opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Toml,
    Postcard,
}

impl TableFormat {
    /// `.toml` files are text, anything else is a postcard blob.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => TableFormat::Toml,
            _ => TableFormat::Postcard,
        }
    }
}

pub fn parse_code(text: &str) -> Result<CodeObject> {
    toml::from_str(text).into_diagnostic()
}

pub fn parse_table(bytes: &[u8], format: TableFormat) -> Result<OpcodeTable> {
    match format {
        TableFormat::Toml => {
            let text = std::str::from_utf8(bytes).into_diagnostic()?;
            toml::from_str(text).into_diagnostic()
        }
        TableFormat::Postcard => OpcodeTable::from_postcard(bytes).into_diagnostic(),
    }
}

pub fn load_code(path: &Path) -> Result<CodeObject> {
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let code = parse_code(&text)
        .wrap_err_with(|| format!("invalid code object in {}", path.display()))?;
    debug!(name = %code.name, len = code.code.len(), "loaded code object");
    Ok(code)
}

pub fn load_table(path: &Path) -> Result<OpcodeTable> {
    let bytes = fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let format = TableFormat::from_path(path);
    let table = parse_table(&bytes, format)
        .wrap_err_with(|| format!("invalid opcode table in {}", path.display()))?;
    debug!(version = table.version(), ?format, "loaded opcode table");
    Ok(table)
}

pub fn save_table(table: &OpcodeTable, path: &Path) -> Result<()> {
    let bytes = table.to_postcard().into_diagnostic()?;
    fs::write(path, bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossdis::{Constant, table_for_version};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("py35.toml")), TableFormat::Toml);
        assert_eq!(TableFormat::from_path(Path::new("PY35.TOML")), TableFormat::Toml);
        assert_eq!(TableFormat::from_path(Path::new("py35.bin")), TableFormat::Postcard);
        assert_eq!(TableFormat::from_path(Path::new("py35")), TableFormat::Postcard);
    }

    #[test]
    fn test_parse_code() {
        let code = parse_code(indoc! {r#"
            name = "answer"
            code = [100, 1, 0, 83]
            consts = ["none", { int = 42 }, { tuple = [{ float = 1.5 }, "ellipsis"] }]
        "#})
        .unwrap();

        assert_eq!(code.name, "answer");
        assert_eq!(code.first_line, 0);
        assert_eq!(
            code.consts,
            vec![
                Constant::None,
                Constant::Int(42),
                Constant::Tuple(vec![Constant::Float(1.5), Constant::Ellipsis]),
            ]
        );
    }

    #[test]
    fn test_parse_postcard_table() {
        let table = table_for_version("2.7").unwrap();
        let bytes = table.to_postcard().unwrap();

        let parsed = parse_table(&bytes, TableFormat::Postcard).unwrap();
        assert_eq!(&parsed, table);
        assert!(parse_table(&bytes, TableFormat::Toml).is_err());
    }
}
