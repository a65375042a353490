//! # tpad-core — editor core for tpad
//!
//! The fundamental building blocks of the notepad:
//!
//! - **[`position`]** — `Position` (line, col) and `Range` types, 0-indexed
//! - **[`buffer`]** — `Buffer` wrapping a rope with editing and metadata
//! - **[`key`]** — toolkit-neutral keyboard events
//! - **[`history`]** — linear undo/redo log of single reversible edits
//! - **[`capture`]** — keystroke and paste classification feeding the log
//! - **[`tags`]** — insertion-ordered store of named highlight ranges
//! - **[`document`]** — buffer plus tags, the unit applications own
//!
//! Persistence (the `.txtp` format) lives in the sibling `tpad-txtp` crate;
//! this crate never touches the filesystem.

pub mod buffer;
pub mod capture;
pub mod document;
pub mod history;
pub mod key;
pub mod position;
pub mod tags;
