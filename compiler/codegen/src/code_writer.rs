//! Indentation-tracking writer for brace-delimited source.
//!
//! Blocks are laid out Allman style: the header on its own line, the opening
//! brace on the next line at the same depth, the body one level deeper.
//!
//! ```
//! use stackwrap_codegen::code_writer::CodeWriter;
//!
//! let mut out = String::new();
//! let mut w = CodeWriter::with_indent_spaces(&mut out, 4);
//! w.block("public class Ping", |_| Ok(())).expect("write to String");
//! assert_eq!(out, "public class Ping\n{\n}\n");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Writer that tracks the current indentation depth
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    /// Create a writer indenting with `indent_string` per level
    pub fn new(writer: W, indent_string: String) -> Self {
        Self { writer, indent_level: Rc::new(Cell::new(0)), indent_string, at_line_start: true }
    }

    /// Create a writer indenting with `spaces` spaces per level
    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    /// Write text without a newline, indenting first if at line start
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.at_line_start = false;
        }
        self.writer.write_str(text)
    }

    /// Write text followed by a newline
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Write an empty line; never carries indentation
    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Increase indentation until the returned guard is dropped
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard { indent_level: Rc::clone(&self.indent_level) }
    }

    /// Write `header`, then a braced body produced by `body`
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(header)?;
        self.writeln("{")?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("}")
    }

    /// Write `items` with `separator` between them
    pub fn write_separated<I, F>(&mut self, items: I, separator: &str, mut write_item: F) -> fmt::Result
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item) -> fmt::Result,
    {
        let mut first = true;
        for item in items {
            if !first {
                self.write(separator)?;
            }
            write_item(self, item)?;
            first = false;
        }
        Ok(())
    }

    /// Write a parenthesized group
    pub fn write_parens<F>(&mut self, f: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.write("(")?;
        f(self)?;
        self.write(")")
    }

    /// Current indentation depth
    pub fn indent_level(&self) -> usize { self.indent_level.get() }

    /// Consume the writer and return the inner sink
    pub fn into_inner(self) -> W { self.writer }

    #[doc(hidden)]
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.write(&args.to_string())
    }

    #[doc(hidden)]
    pub fn writeln_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.writeln(&args.to_string())
    }
}

/// Restores the previous indentation depth on drop
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) { self.indent_level.set(self.indent_level.get().saturating_sub(1)); }
}

/// `write!` for a [`CodeWriter`]
#[macro_export]
macro_rules! cw_write {
    ($writer:expr, $($arg:tt)*) => {
        $writer.write_fmt(format_args!($($arg)*))
    };
}

/// `writeln!` for a [`CodeWriter`]
#[macro_export]
macro_rules! cw_writeln {
    ($writer:expr, $($arg:tt)*) => {
        $writer.writeln_fmt(format_args!($($arg)*))
    };
}
