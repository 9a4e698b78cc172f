//! Annotation requests.
//!
//! The engine reports which cells deserve highlighting; how they are drawn is
//! up to the sink.

use medicor_model::AnnotationKind;

/// Receiver of annotation requests, called as records are produced.
pub trait AnnotationSink {
    fn annotate(&mut self, row: usize, column: usize, kind: AnnotationKind);
}

/// A single annotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotation {
    pub row: usize,
    pub column: usize,
    pub kind: AnnotationKind,
}

/// Sink that drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardAnnotations;

impl AnnotationSink for DiscardAnnotations {
    fn annotate(&mut self, _row: usize, _column: usize, _kind: AnnotationKind) {}
}

/// Sink that keeps requests in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationLog {
    entries: Vec<Annotation>,
}

impl AnnotationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Annotation] {
        &self.entries
    }

    pub fn count(&self, kind: AnnotationKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}

impl AnnotationSink for AnnotationLog {
    fn annotate(&mut self, row: usize, column: usize, kind: AnnotationKind) {
        self.entries.push(Annotation { row, column, kind });
    }
}

impl<S: AnnotationSink + ?Sized> AnnotationSink for &mut S {
    fn annotate(&mut self, row: usize, column: usize, kind: AnnotationKind) {
        (**self).annotate(row, column, kind);
    }
}
