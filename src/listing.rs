//! Columnar disassembly listings.
//!
//! One line per instruction: source line, current-instruction marker (`-->`),
//! jump-target marker (`>>`), offset, mnemonic, raw operand and the display
//! operand in parentheses.
//!
//! ```text
//!   2           0 LOAD_FAST                0 (x)
//!               3 LOAD_CONST               1 (3)
//! ```
//!
//! A blank line separates the instructions of consecutive source lines.
//!
//! [`render_code_info_to`] writes the summary of a code object instead: its
//! name, location and symbol tables.

use std::fmt::Display;
use std::io::Write;

use crate::{Bytecode, CodeObject, DecodeError, Error, Instruction};

/// Controls the listing layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Width of the line number column; 0 omits the column and the blank
    /// lines between source lines.
    pub lineno_width: usize,
    /// Offset of the instruction to mark with `-->`.
    pub current_offset: Option<usize>,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            lineno_width: 3,
            current_offset: None,
        }
    }
}

/// Format one instruction as a listing line, without the trailing newline.
pub fn format_instruction(
    instruction: &Instruction,
    lineno_width: usize,
    mark_as_current: bool,
) -> String {
    let mut fields: Vec<String> = Vec::with_capacity(7);

    if lineno_width > 0 {
        fields.push(match instruction.source_line {
            Some(line) => format!("{:>width$}", line, width = lineno_width),
            None => " ".repeat(lineno_width),
        });
    }
    fields.push(if mark_as_current { "-->" } else { "   " }.to_string());
    fields.push(if instruction.is_jump_target { ">>" } else { "  " }.to_string());
    fields.push(format!("{:>4}", instruction.offset));
    fields.push(format!("{:<20}", instruction.mnemonic));
    if let Some(arg) = instruction.raw_operand {
        fields.push(format!("{:>5}", arg));
        if !instruction.display_operand.is_empty() {
            fields.push(format!("({})", instruction.display_operand));
        }
    }

    fields.join(" ").trim_end().to_string()
}

/// Write a listing of `instructions` to `writer`.
///
/// Lines are written as instructions are decoded; on a decode error the
/// lines before it have already been written.
pub fn render_instructions_to<I>(
    instructions: I,
    options: &ListingOptions,
    writer: &mut dyn Write,
) -> Result<(), Error>
where
    I: IntoIterator<Item = Result<Instruction, DecodeError>>,
{
    let show_lineno = options.lineno_width > 0;
    for instruction in instructions {
        let instruction = instruction?;
        if show_lineno && instruction.source_line.is_some() && instruction.offset > 0 {
            writeln!(writer)?;
        }
        let is_current = options.current_offset == Some(instruction.offset);
        writeln!(
            writer,
            "{}",
            format_instruction(&instruction, options.lineno_width, is_current)
        )?;
    }
    Ok(())
}

/// Write a listing of a code object's bytecode to `writer`.
pub fn render_to(
    bytecode: &Bytecode<'_>,
    options: &ListingOptions,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    render_instructions_to(bytecode, options, writer)
}

/// Render a listing to a String.
///
/// Decode errors are returned rather than rendered, so a partial listing is
/// never produced.
pub fn render_to_string(bytecode: &Bytecode<'_>, options: &ListingOptions) -> Result<String, Error> {
    let mut buf = Vec::new();
    render_to(bytecode, options, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the details of a code object: name, filename, first line, then each
/// non-empty symbol table with its indices.
pub fn render_code_info_to(code: &CodeObject, writer: &mut dyn Write) -> Result<(), Error> {
    writeln!(writer, "{:<19}{}", "Name:", code.name)?;
    writeln!(writer, "{:<19}{}", "Filename:", code.filename)?;
    writeln!(writer, "{:<19}{}", "First line:", code.first_line)?;
    write_table(writer, "Constants:", &code.consts)?;
    write_table(writer, "Names:", &code.names)?;
    write_table(writer, "Variable names:", &code.varnames)?;
    write_table(writer, "Free variables:", &code.freevars)?;
    write_table(writer, "Cell variables:", &code.cellvars)?;
    Ok(())
}

/// Render the details of a code object to a String.
pub fn code_info(code: &CodeObject) -> Result<String, Error> {
    let mut buf = Vec::new();
    render_code_info_to(code, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_table<T: Display>(writer: &mut dyn Write, title: &str, items: &[T]) -> Result<(), Error> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{}", title)?;
    for (index, item) in items.iter().enumerate() {
        writeln!(writer, "{:>4}: {}", index, item)?;
    }
    Ok(())
}
