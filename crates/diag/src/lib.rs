/*
 * Copyright (c) 2026. The wacc authors.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Diagnostics collection shared by every compilation phase.
//!
//! Errors are collected, never raised: each phase appends to a single
//! [`Diagnostics`] list and keeps going whenever it can produce a useful
//! partial result. Any non-warning entry sets a sticky fatal flag that
//! gates the phases that follow it. Line and column numbers are not
//! stored on entries; they are derived from the source buffer when the
//! list is printed.

use std::fmt;
use std::ops::Range;

/// Byte range into the source buffer. Matches the span type the lexer
/// produces.
pub type Span = Range<usize>;

pub mod codes;

/// Severity class of a diagnostic. Everything except `Warning` is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Lexical,
    Syntax,
    Semantic,
    Codegen,
    Warning,
}

impl ErrorLevel {
    fn label(self) -> &'static str {
        match self {
            ErrorLevel::Warning => "warning",
            _ => "error",
        }
    }
}

/// A single collected diagnostic.
#[derive(Debug, Clone)]
pub struct CompilerError {
    /// Stable numeric code, grouped by phase (see [`codes`]).
    pub id: u32,
    pub level: ErrorLevel,
    /// Byte range of the offending source text.
    pub span: Span,
    pub message: String,
    /// Optional actionable fix, printed as a trailing `note:` line.
    pub suggestion: Option<String>,
}

/// Ordered list of diagnostics with the sticky fatal flag.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<CompilerError>,
    fatal: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic. Any level other than `Warning` marks the
    /// whole compilation as failed.
    pub fn add(
        &mut self,
        id: u32,
        level: ErrorLevel,
        span: Span,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) {
        self.errors.push(CompilerError {
            id,
            level,
            span,
            message: message.into(),
            suggestion: suggestion.map(str::to_string),
        });
        if level != ErrorLevel::Warning {
            self.fatal = true;
        }
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilerError> {
        self.errors.iter()
    }

    /// Render every entry in the user-facing format:
    ///
    /// ```text
    /// file.c:2:12: id 2003 error: expected ';'
    ///    return 42
    ///             ^
    /// note: add a semicolon
    /// ```
    pub fn render(&self, source: &str, filename: &str) -> String {
        use fmt::Write;

        let mut out = String::new();
        for error in &self.errors {
            let (line, column) = line_col(source, error.span.start);
            writeln!(
                out,
                "{}:{}:{}: id {} {}: {}",
                filename,
                line,
                column,
                error.id,
                error.level.label(),
                error.message
            )
            .unwrap();
            if let Some(context) = context_line(source, line) {
                writeln!(out, "   {}", context).unwrap();
                writeln!(out, "   {}^", " ".repeat(column.saturating_sub(1))).unwrap();
            }
            if let Some(suggestion) = &error.suggestion {
                writeln!(out, "note: {}", suggestion).unwrap();
            }
            out.push('\n');
        }
        out
    }

    /// Print all diagnostics to stdout.
    pub fn print(&self, source: &str, filename: &str) {
        print!("{}", self.render(source, filename));
    }
}

/// 1-based line and column of a byte offset, computed by scanning the
/// buffer. Tabs count as one column.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut column = 1;
    for byte in source.as_bytes()[..offset].iter() {
        if *byte == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// The text of the 1-based `line`, without its terminator.
pub fn context_line(source: &str, line: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(line.saturating_sub(1))
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}
