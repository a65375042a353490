//! A document: buffer text plus its tag store.
//!
//! This is the unit the codec reads and writes and the unit an application
//! owns. The edit log and the capture policy only ever see the buffer half;
//! tags matter to rendering and persistence alone.

use crate::buffer::Buffer;
use crate::tags::TagSet;

/// Buffer and tags, travelling together.
#[derive(Debug, Default)]
pub struct Document {
    buffer: Buffer,
    tags: TagSet,
}

impl Document {
    /// An empty document: no text, no tags, no path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
            tags: TagSet::new(),
        }
    }

    /// Assemble a document from an existing buffer and tag store.
    #[must_use]
    pub const fn from_parts(buffer: Buffer, tags: TagSet) -> Self {
        Self { buffer, tags }
    }

    /// The text half.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Mutable access to the text half.
    #[inline]
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// The tag half.
    #[inline]
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Mutable access to the tag half.
    #[inline]
    pub const fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn new_document_is_blank() {
        let doc = Document::new();
        assert!(doc.buffer().is_empty());
        assert!(doc.tags().is_empty());
    }

    #[test]
    fn from_parts_keeps_both_halves() {
        let buffer = Buffer::from_text("hello\n");
        let mut tags = TagSet::new();
        tags.add_range("yellow", Position::new(0, 0), Position::new(0, 5));

        let doc = Document::from_parts(buffer, tags);
        assert_eq!(doc.buffer().contents(), "hello\n");
        assert_eq!(doc.tags().ranges_of("yellow").len(), 1);
    }

    #[test]
    fn halves_are_independently_mutable() {
        let mut doc = Document::new();
        doc.buffer_mut().insert(Position::ZERO, "hi");
        doc.tags_mut()
            .add_range("green", Position::new(0, 0), Position::new(0, 2));

        assert_eq!(doc.buffer().contents(), "hi");
        assert_eq!(doc.tags().names().count(), 1);
    }
}
