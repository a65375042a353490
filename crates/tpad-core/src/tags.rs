//! Named highlight ranges over the buffer.
//!
//! A tag is a name (`"yellow"`, `"sel"`, anything) mapping to a list of
//! `(start, end)` position pairs. The store is the single source of truth
//! the UI renders from and the codec serializes; it is not hidden inside a
//! widget.
//!
//! Two rules shape the API:
//!
//! - **Insertion order is enumeration order.** The first time a name is
//!   added decides where it appears when iterating, which in turn decides
//!   the order of records in a saved file.
//! - **Ranges are stored verbatim.** Nothing here validates against the
//!   buffer: out-of-bounds pairs and reversed pairs are kept as given. A
//!   reversed pair simply never contains any position, so it renders as
//!   nothing, but it survives a load/save cycle intact.
//!
//! The transient selection lives here too, under the reserved name [`SEL`].
//! It behaves like any other tag except that serialization skips it.

use crate::position::Position;

/// The reserved selection tag. Serialization excludes it; everything else
/// treats it as an ordinary tag.
pub const SEL: &str = "sel";

/// One named tag and its recorded ranges.
#[derive(Debug, Clone)]
struct TagEntry {
    name: String,
    ranges: Vec<(Position, Position)>,
}

/// Insertion-ordered store of named ranges.
///
/// Lookup is linear; a notepad holds a handful of colour tags plus the
/// selection, so a `Vec` of entries beats a map both in simplicity and in
/// keeping a stable order for free.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    entries: Vec<TagEntry>,
}

impl TagSet {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// True when no tag has any range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a range to a tag, creating the tag on first use. The pair is
    /// stored exactly as given.
    pub fn add_range(&mut self, name: &str, start: Position, end: Position) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.ranges.push((start, end));
        } else {
            self.entries.push(TagEntry {
                name: name.to_string(),
                ranges: vec![(start, end)],
            });
        }
    }

    /// The ranges recorded for a tag, in insertion order. Unknown names
    /// yield an empty slice.
    #[must_use]
    pub fn ranges_of(&self, name: &str) -> &[(Position, Position)] {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map_or(&[], |e| e.ranges.as_slice())
    }

    /// Remove a tag and all its ranges. Returns `true` if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Tag names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Iterate `(name, ranges)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(Position, Position)])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.ranges.as_slice()))
    }

    /// Drop every tag.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    #[test]
    fn new_store_is_empty() {
        let tags = TagSet::new();
        assert!(tags.is_empty());
        assert_eq!(tags.names().count(), 0);
    }

    #[test]
    fn add_and_look_up() {
        let mut tags = TagSet::new();
        tags.add_range("yellow", p(0, 0), p(0, 5));
        assert_eq!(tags.ranges_of("yellow"), &[(p(0, 0), p(0, 5))]);
        assert!(!tags.is_empty());
    }

    #[test]
    fn unknown_name_yields_empty_slice() {
        let tags = TagSet::new();
        assert!(tags.ranges_of("green").is_empty());
    }

    #[test]
    fn ranges_accumulate_in_order() {
        let mut tags = TagSet::new();
        tags.add_range("yellow", p(0, 0), p(0, 2));
        tags.add_range("yellow", p(1, 0), p(1, 4));
        assert_eq!(
            tags.ranges_of("yellow"),
            &[(p(0, 0), p(0, 2)), (p(1, 0), p(1, 4))]
        );
    }

    #[test]
    fn names_keep_insertion_order() {
        let mut tags = TagSet::new();
        tags.add_range("pink", p(0, 0), p(0, 1));
        tags.add_range("yellow", p(0, 1), p(0, 2));
        tags.add_range("pink", p(0, 2), p(0, 3));
        let names: Vec<_> = tags.names().collect();
        assert_eq!(names, ["pink", "yellow"]);
    }

    #[test]
    fn iter_pairs_names_with_ranges() {
        let mut tags = TagSet::new();
        tags.add_range("cyan", p(0, 0), p(0, 1));
        tags.add_range("green", p(2, 0), p(2, 9));

        let all: Vec<_> = tags.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "cyan");
        assert_eq!(all[1].0, "green");
        assert_eq!(all[1].1, &[(p(2, 0), p(2, 9))]);
    }

    #[test]
    fn remove_drops_all_ranges() {
        let mut tags = TagSet::new();
        tags.add_range("yellow", p(0, 0), p(0, 1));
        tags.add_range("yellow", p(0, 2), p(0, 3));

        assert!(tags.remove("yellow"));
        assert!(tags.ranges_of("yellow").is_empty());
        assert!(!tags.remove("yellow"));
    }

    #[test]
    fn reversed_pair_is_kept_verbatim() {
        // A start > end pair matches nothing but must survive a load/save
        // cycle byte for byte.
        let mut tags = TagSet::new();
        tags.add_range("yellow", p(3, 0), p(1, 0));
        assert_eq!(tags.ranges_of("yellow"), &[(p(3, 0), p(1, 0))]);
    }

    #[test]
    fn sel_is_an_ordinary_entry_here() {
        let mut tags = TagSet::new();
        tags.add_range(SEL, p(0, 0), p(0, 4));
        assert_eq!(tags.ranges_of(SEL).len(), 1);
        assert_eq!(tags.names().collect::<Vec<_>>(), [SEL]);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut tags = TagSet::new();
        tags.add_range("green", p(0, 0), p(0, 1));
        tags.clear();
        assert!(tags.is_empty());
    }
}
