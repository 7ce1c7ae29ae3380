use core::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::{String, ToString, Vec, format};

/// An entry of a code object's constant pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    None,
    Ellipsis,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Constant>),
    /// Nested code object, referred to by name.
    Code(String),
}

impl Constant {
    /// The runtime's `repr()` of the constant, used as the display operand.
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::None => f.write_str("None"),
            Constant::Ellipsis => f.write_str("Ellipsis"),
            Constant::Bool(true) => f.write_str("True"),
            Constant::Bool(false) => f.write_str("False"),
            Constant::Int(value) => write!(f, "{}", value),
            Constant::Float(value) => f.write_str(&float_repr(*value)),
            Constant::Str(text) => write_quoted(f, text.chars(), ""),
            Constant::Bytes(bytes) => {
                write_quoted(f, bytes.iter().map(|&byte| char::from(byte)), "b")
            }
            Constant::Tuple(items) => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Constant::Code(name) => write!(f, "<code object {}>", name),
        }
    }
}

/// Shortest round-trip float text, switching to exponent form outside
/// `1e-4 <= |x| < 1e16` with a signed two-digit exponent.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let positional = format!("{}", value);
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
    }
}

/// Write a quoted literal. Single quotes are preferred unless the text
/// contains a single quote and no double quote.
fn write_quoted(
    f: &mut fmt::Formatter<'_>,
    chars: impl Iterator<Item = char> + Clone,
    prefix: &str,
) -> fmt::Result {
    let has_single = chars.clone().any(|c| c == '\'');
    let has_double = chars.clone().any(|c| c == '"');
    let quote = if has_single && !has_double { '"' } else { '\'' };

    f.write_str(prefix)?;
    f.write_char(quote)?;
    for c in chars {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(f, "\\x{:02x}", c as u32)?,
            // Bytes above ASCII are escaped; text is printed as is.
            c if prefix == "b" && (c as u32) > 0x7f => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}
