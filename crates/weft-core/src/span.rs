//! Source locations.
//!
//! A [`SourceSpan`] locates a range of characters in a named source file. It
//! carries a flat character offset and length, which define its identity, plus
//! the 1-based line/character positions of both ends for display.

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Range,
    sync::Arc,
};

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing or combining spans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("invalid source position {line}:{character}, both coordinates are 1-based")]
    InvalidPosition { line: u32, character: u32 },

    #[error("cannot merge a span in `{left}` with a span in `{right}`")]
    CrossFileMerge { left: String, right: String },

    #[error("source offset {offset} is past the last representable line/character position")]
    PositionOverflow { offset: usize },
}

/// A 1-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct SourcePosition {
    line: u32,
    character: u32,
}

impl SourcePosition {
    /// Position of the first character of a file.
    pub const START: SourcePosition = SourcePosition {
        line: 1,
        character: 1,
    };

    /// Create a position, rejecting zero coordinates.
    pub fn new(line: u32, character: u32) -> Result<Self, SpanError> {
        if line == 0 || character == 0 {
            return Err(SpanError::InvalidPosition { line, character });
        }
        Ok(Self { line, character })
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn character(&self) -> u32 {
        self.character
    }
}

impl TryFrom<(u32, u32)> for SourcePosition {
    type Error = SpanError;

    fn try_from((line, character): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(line, character)
    }
}

impl From<SourcePosition> for (u32, u32) {
    fn from(position: SourcePosition) -> Self {
        (position.line, position.character)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.character)
    }
}

/// A range of characters in a named source file.
///
/// Equality and hashing consider only the file path, start index and length;
/// the positions are derived display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpan {
    file_path: Arc<str>,
    start_index: usize,
    length: usize,
    start_position: SourcePosition,
    end_position: SourcePosition,
}

impl SourceSpan {
    /// Create a span from its parts.
    pub fn new(
        file_path: impl Into<Arc<str>>,
        start_index: usize,
        length: usize,
        start_position: SourcePosition,
        end_position: SourcePosition,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            start_index,
            length,
            start_position,
            end_position,
        }
    }

    /// A zero-length span at the very start of a file.
    ///
    /// Used when a diagnostic has to be reported against a file but no
    /// better location is known.
    pub fn empty_at_start(file_path: impl Into<Arc<str>>) -> Self {
        Self::new(
            file_path,
            0,
            0,
            SourcePosition::START,
            SourcePosition::START,
        )
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end_index(&self) -> usize {
        self.start_index + self.length
    }

    pub fn start_position(&self) -> SourcePosition {
        self.start_position
    }

    pub fn end_position(&self) -> SourcePosition {
        self.end_position
    }

    /// The character range covered by this span.
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index()
    }

    /// Create a span covering both `self` and `other`.
    ///
    /// The earlier start and the later end are taken together with their
    /// positions.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::CrossFileMerge`] if the spans belong to different
    /// files.
    pub fn merge_with(&self, other: &SourceSpan) -> Result<SourceSpan, SpanError> {
        if self.file_path != other.file_path {
            return Err(SpanError::CrossFileMerge {
                left: self.file_path.to_string(),
                right: other.file_path.to_string(),
            });
        }

        let (start_index, start_position) = if other.start_index < self.start_index {
            (other.start_index, other.start_position)
        } else {
            (self.start_index, self.start_position)
        };
        let (end_index, end_position) = if other.end_index() > self.end_index() {
            (other.end_index(), other.end_position)
        } else {
            (self.end_index(), self.end_position)
        };

        Ok(Self {
            file_path: Arc::clone(&self.file_path),
            start_index,
            length: end_index - start_index,
            start_position,
            end_position,
        })
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path
            && self.start_index == other.start_index
            && self.length == other.length
    }
}

impl Eq for SourceSpan {}

impl Hash for SourceSpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_path.hash(state);
        self.start_index.hash(state);
        self.length.hash(state);
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})-({})",
            self.file_path, self.start_position, self.end_position
        )
    }
}

/// Maps character offsets in a text to 1-based line/character positions.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Character offset at which each line starts.
    line_starts: Vec<usize>,
    char_count: usize,
}

impl LineMap {
    /// Build a line map for `text`.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut char_count = 0;
        for ch in text.chars() {
            char_count += 1;
            if ch == '\n' {
                line_starts.push(char_count);
            }
        }
        trace!(lines = line_starts.len(), chars = char_count; "Line map built");
        Self {
            line_starts,
            char_count,
        }
    }

    /// Number of lines in the text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of the character at `offset`.
    ///
    /// Offsets past the end of the text are clamped to the end.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::PositionOverflow`] if the line or character
    /// number does not fit a `u32`.
    pub fn position(&self, offset: usize) -> Result<SourcePosition, SpanError> {
        let offset = offset.min(self.char_count);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let character = offset - self.line_starts[line];
        let one_based = |index: usize| {
            u32::try_from(index)
                .ok()
                .and_then(|index| index.checked_add(1))
                .ok_or(SpanError::PositionOverflow { offset })
        };
        match (one_based(line), one_based(character)) {
            (Ok(line), Ok(character)) => Ok(SourcePosition { line, character }),
            (Err(err), _) | (_, Err(err)) => {
                warn!(offset = offset, line = line, character = character; "Source position out of range");
                Err(err)
            }
        }
    }

    /// Build a span for the character `range` of `file_path`.
    ///
    /// The range is clamped to the text.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::PositionOverflow`] if either end has no
    /// representable position.
    pub fn span(
        &self,
        file_path: impl Into<Arc<str>>,
        range: Range<usize>,
    ) -> Result<SourceSpan, SpanError> {
        let start = range.start.min(self.char_count);
        let end = range.end.clamp(start, self.char_count);
        Ok(SourceSpan::new(
            file_path,
            start,
            end - start,
            self.position(start)?,
            self.position(end)?,
        ))
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn span_strategy() -> impl Strategy<Value = SourceSpan> {
        (0usize..500, 0usize..500).prop_map(|(start, len)| {
            LineMap::new(&"ab\n".repeat(400))
                .span("p.x", start..start + len)
                .expect("positions of a short text fit u32")
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Merging is commutative in the range it covers.
    fn check_merge_commutative(a: SourceSpan, b: SourceSpan) -> Result<(), TestCaseError> {
        let ab = a.merge_with(&b).unwrap();
        let ba = b.merge_with(&a).unwrap();
        prop_assert_eq!(ab.start_index(), ba.start_index());
        prop_assert_eq!(ab.length(), ba.length());
        prop_assert!(ab.start_index() <= a.start_index().min(b.start_index()));
        prop_assert!(ab.end_index() >= a.end_index().max(b.end_index()));
        Ok(())
    }

    /// Merging a span with itself yields the same span.
    fn check_merge_idempotent(a: SourceSpan) -> Result<(), TestCaseError> {
        let merged = a.merge_with(&a).unwrap();
        prop_assert_eq!(&merged, &a);
        prop_assert_eq!(merged.start_position(), a.start_position());
        prop_assert_eq!(merged.end_position(), a.end_position());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn merge_commutative(a in span_strategy(), b in span_strategy()) {
            check_merge_commutative(a, b)?;
        }

        #[test]
        fn merge_idempotent(a in span_strategy()) {
            check_merge_idempotent(a)?;
        }
    }
}
