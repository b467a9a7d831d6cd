//! Error types for loading and saving design documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::config::ConfigError;
use crate::layout::ElementId;

/// Character range in source text, as ariadne counts it
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not a well-formed design document
    #[error("malformed document at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
        span: Span,
    },

    /// Two elements share an id
    #[error("duplicate element id {id}")]
    DuplicateId { id: ElementId },

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to access document: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Build a malformed-document error from a serde_json failure on `source`
    pub fn malformed(err: serde_json::Error, source: &str) -> Self {
        let (line, column) = (err.line(), err.column());
        let chars = source.chars().count();
        // Keep the label on a real character, even for errors at end of input
        let start = char_offset(source, line, column).min(chars.saturating_sub(1));
        // serde_json keeps the position in the message; strip it
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Self::Malformed {
            line,
            column,
            message,
            span: start..(start + 1).min(chars).max(start),
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Malformed { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, span) = match self {
            Self::Malformed { message, span, .. } => (message, span),
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("malformed design document")
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Top-level failure of a command-line run
#[derive(Error, Debug)]
pub enum DesignError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown element kind '{0}'")]
    UnknownKind(String),
}

/// Convert a 1-based line/column position into a byte offset
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return source.len();
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// Character index of a 1-based line/column position, where serde_json
/// counts columns in bytes
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let mut byte = byte_offset(source, line, column);
    while !source.is_char_boundary(byte) {
        byte -= 1;
    }
    source[..byte].chars().count()
}
