//! Error types for tag scanning

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Structural problems with the tag markers of an input file
#[derive(Error, Debug)]
pub enum TagError {
    /// A Start marker without its End, or an End without its Start
    #[error("malformed template tag '{tag}' at line {line}: {reason}")]
    Malformed {
        tag: String,
        /// 1-based line number of the offending marker
        line: usize,
        reason: String,
        span: Span,
    },
}

impl TagError {
    /// Build a malformed-tag error for the marker at `line_idx` (0-based) of `lines`
    pub fn malformed(
        tag: impl Into<String>,
        lines: &[&str],
        line_idx: usize,
        reason: impl Into<String>,
    ) -> Self {
        let start: usize = lines[..line_idx].iter().map(|l| l.len()).sum();
        let len = lines
            .get(line_idx)
            .map(|l| l.trim_end_matches(['\r', '\n']).len())
            .unwrap_or(0);
        TagError::Malformed {
            tag: tag.into(),
            line: line_idx + 1,
            reason: reason.into(),
            span: start..start + len,
        }
    }

    /// 1-based line of the offending marker
    pub fn line(&self) -> usize {
        match self {
            TagError::Malformed { line, .. } => *line,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            TagError::Malformed {
                tag, reason, span, ..
            } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(format!("malformed template tag '{}'", tag))
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(reason)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_span_and_line() {
        let lines = ["a\n", "//<X !Start!>\n", "b\n"];
        let err = TagError::malformed("X", &lines, 1, "missing End marker");
        assert_eq!(err.line(), 2);
        match &err {
            TagError::Malformed { span, .. } => assert_eq!(span, &(2..15)),
        }
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_format_mentions_reason() {
        let source = "a\n//<X !Start!>\nb\n";
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        let err = TagError::malformed("X", &lines, 1, "missing End marker");
        let report = err.format(source, "gui.ino");
        assert!(report.contains("missing End marker"));
    }
}
