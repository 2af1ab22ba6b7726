//! Error adapter for converting FiguraError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Description errors
//! keep their TOML source, so the report shows the offending record.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use figura::FiguraError;

/// Wraps a [`FiguraError`] for rendering with miette.
pub struct ErrorAdapter<'a>(pub &'a FiguraError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FiguraError::Io(_) => "figura::io",
            FiguraError::Config(_) => "figura::config",
            FiguraError::Description { .. } => "figura::description",
            FiguraError::Color(_) => "figura::color",
            FiguraError::Export(_) => "figura::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            FiguraError::Description { .. } => Some(Box::new(
                "colors may be palette names, CSS names or hex values",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            FiguraError::Description { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match &self.0 {
            FiguraError::Description {
                message,
                span: Some(span),
                ..
            } => {
                let span = SourceSpan::new(span.start.into(), span.len());
                Some(Box::new(std::iter::once(
                    LabeledSpan::new_primary_with_span(Some(message.clone()), span),
                )))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_error_is_labeled() {
        let err = FiguraError::new_description_error(
            "broken",
            "fill = \"nope\"",
            "invalid color `nope`",
            Some(7..13),
        );
        let adapter = ErrorAdapter(&err);

        assert!(adapter.source_code().is_some());
        assert_eq!(adapter.code().unwrap().to_string(), "figura::description");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("invalid color `nope`"));
        assert_eq!(labels[0].offset(), 7);
        assert_eq!(labels[0].len(), 6);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_description_error_without_span() {
        let err = FiguraError::new_description_error("broken", "", "palette: bad", None);
        let adapter = ErrorAdapter(&err);

        assert!(adapter.labels().is_none());
        assert!(adapter.source_code().is_some());
    }

    #[test]
    fn test_non_description_error() {
        let err = FiguraError::Config("bad value".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.to_string(), "Configuration error: bad value");
        assert_eq!(adapter.code().unwrap().to_string(), "figura::config");
        assert!(adapter.source_code().is_none());
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_report_renders_snippet() {
        let src = "[[shapes]]\nkind = \"box\"\nfill = \"nope\"\n";
        let start = src.find("\"nope\"").unwrap();
        let err = FiguraError::new_description_error(
            "broken",
            src,
            "invalid color `nope`",
            Some(start..start + 6),
        );

        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("invalid color"), "{out}");
        assert!(out.contains("fill"), "{out}");
    }
}
