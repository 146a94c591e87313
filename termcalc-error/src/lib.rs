//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors in `termcalc` are attached to regions of a rendered expression. The regions are plain
//! character ranges, so the same machinery reports a malformed number in the raw input and an
//! operator without operands in a partially reduced expression.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// Builds a report with one label per span.
///
/// Labels are paired with spans by position; an empty label string produces an unlabelled
/// highlight. If no spans are given, the report points at the start of the source.
pub fn report<'a, 'r>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    labels: &[String],
    help: Option<String>,
) -> Report<'r, (&'a str, Range<usize>)> {
    let offset = spans.first().map(|span| span.start).unwrap_or(0);
    let mut builder = Report::build(ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(
            spans
                .iter()
                .enumerate()
                .map(|(i, span)| {
                    let mut label = Label::new((src_id, span.clone())).with_color(EXPR);
                    match labels.get(i).or(labels.last()) {
                        Some(label_str) if !label_str.is_empty() => {
                            label = label.with_message(label_str);
                        },
                        _ => (),
                    }
                    label
                })
                .collect::<Vec<_>>(),
        );

    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, using `input` as the highlighted source.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Renders the report into a string, including any color codes.
    pub fn render(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
