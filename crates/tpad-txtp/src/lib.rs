//! # tpad-txtp — tagged-text persistence
//!
//! Reads and writes `.txtp` files: plain text plus highlight metadata in a
//! line-oriented format a text editor (or a human with `cat`) can make
//! sense of.
//!
//! # Format
//!
//! A payload is UTF-8 text split on `\n`. Each line is classified by its
//! **trimmed** form:
//!
//! | Line (trimmed)   | Meaning                          |
//! |------------------|----------------------------------|
//! | starts with `#`  | comment, contributes nothing     |
//! | contains `,`     | range record `START,END,TAG`     |
//! | anything else    | body text, kept verbatim         |
//!
//! Positions use the wire form `LINE.COL` with a **1-based line** and a
//! **0-based column**: `3.10` is line 3, column 10. A record tags the
//! half-open span `[START, END)` with `TAG`. The body is the text lines
//! joined back with `\n`, so records may trail the body or sit between text
//! lines. A serialized body always ends with a newline; `encode` appends
//! one when the buffer lacks it.
//!
//! Decoding is strict about records (exactly three fields, numeric
//! positions) and lenient about everything else: invalid UTF-8 is replaced
//! with U+FFFD, unknown tag names and out-of-range positions are stored
//! as-is. One malformed record fails the whole decode, so a caller never
//! ends up holding half a document.
//!
//! File dispatch is asymmetric on purpose: `load` parses records from both
//! `.txt` and `.txtp` (any other extension loads raw), while `save` writes
//! records only for `.txtp` and strips them everywhere else. The transient
//! selection tag is never written.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use tpad_core::buffer::Buffer;
use tpad_core::document::Document;
use tpad_core::position::Position;
use tpad_core::tags::{SEL, TagSet};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading or saving tagged text.
///
/// `line` fields are 1-based line numbers in the payload, counting every
/// line (text and comments included), so messages point at the offending
/// file line directly.
#[derive(Debug, Error)]
pub enum Error {
    /// A record line did not split into exactly `start,end,tag`.
    #[error("line {line}: record has {count} fields, expected start,end,tag")]
    FieldCount { line: usize, count: usize },

    /// A record position was not `LINE.COL` with a 1-based line.
    #[error("line {line}: malformed position {text:?}")]
    Position { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Wire positions
// ---------------------------------------------------------------------------

/// Render a position in wire form: 1-based line, 0-based column.
fn fmt_position(pos: Position) -> String {
    format!("{}.{}", pos.line + 1, pos.col)
}

fn bad_position(line_no: usize, text: &str) -> Error {
    Error::Position {
        line: line_no,
        text: text.to_string(),
    }
}

/// Parse the wire form `LINE.COL`. Both halves must be plain ASCII digits
/// and the line must be at least 1; symbolic indices such as `end` are
/// rejected.
fn parse_position(text: &str, line_no: usize) -> Result<Position, Error> {
    let (line, col) = text
        .split_once('.')
        .ok_or_else(|| bad_position(line_no, text))?;

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(line) || !digits(col) {
        return Err(bad_position(line_no, text));
    }

    let line: usize = line.parse().map_err(|_| bad_position(line_no, text))?;
    let col: usize = col.parse().map_err(|_| bad_position(line_no, text))?;
    if line == 0 {
        return Err(bad_position(line_no, text));
    }
    Ok(Position::new(line - 1, col))
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Serialize a document: body text followed by one record per tagged range.
///
/// Tags appear in store enumeration order, ranges in recorded order, so
/// encoding is deterministic. The selection tag is skipped.
#[must_use]
pub fn encode(doc: &Document) -> String {
    let mut out = body_with_final_newline(doc.buffer());
    for (name, ranges) in doc.tags().iter() {
        if name == SEL {
            continue;
        }
        for (start, end) in ranges {
            out.push_str(&fmt_position(*start));
            out.push(',');
            out.push_str(&fmt_position(*end));
            out.push(',');
            out.push_str(name);
            out.push('\n');
        }
    }
    out
}

/// Serialize the body alone, without records. Used when saving to a file
/// whose extension does not carry metadata.
#[must_use]
pub fn encode_plain(doc: &Document) -> String {
    body_with_final_newline(doc.buffer())
}

fn body_with_final_newline(buf: &Buffer) -> String {
    let mut body = buf.contents();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    body
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Rebuild a document from raw payload bytes.
///
/// Invalid UTF-8 never fails the decode; it becomes U+FFFD. Text lines are
/// kept verbatim (untrimmed), records go into the tag store in file order.
///
/// # Errors
///
/// Returns [`Error::FieldCount`] or [`Error::Position`] for a malformed
/// record. On error, nothing of the payload is returned: the caller's
/// current document stays whatever it was.
pub fn decode(bytes: &[u8]) -> Result<Document, Error> {
    let raw = String::from_utf8_lossy(bytes);
    let mut text_lines: Vec<&str> = Vec::new();
    let mut tags = TagSet::new();

    for (idx, line) in raw.split('\n').enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.contains(',') {
            parse_record(trimmed, idx + 1, &mut tags)?;
            continue;
        }
        text_lines.push(line);
    }

    let body = text_lines.join("\n");
    Ok(Document::from_parts(Buffer::from_text(&body), tags))
}

fn parse_record(record: &str, line_no: usize, tags: &mut TagSet) -> Result<(), Error> {
    let fields: Vec<&str> = record.split(',').collect();
    if fields.len() != 3 {
        return Err(Error::FieldCount {
            line: line_no,
            count: fields.len(),
        });
    }
    let start = parse_position(fields[0], line_no)?;
    let end = parse_position(fields[1], line_no)?;
    tags.add_range(fields[2], start, end);
    Ok(())
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// True when the extension marks a file whose records are parsed on load.
fn parses_metadata(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt" | "txtp")
    )
}

/// True when the extension marks a file that records are written to.
fn writes_metadata(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("txtp")
}

/// Load a document from disk, dispatching on the file extension.
///
/// `.txt` and `.txtp` run through [`decode`]; anything else is taken as raw
/// text with no metadata interpretation. The buffer remembers the path.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, or a decode error
/// for a malformed record.
pub fn load(path: &Path) -> Result<Document, Error> {
    let bytes = fs::read(path)?;
    let mut doc = if parses_metadata(path) {
        decode(&bytes)?
    } else {
        let text = String::from_utf8_lossy(&bytes);
        Document::from_parts(Buffer::from_text(&text), TagSet::new())
    };
    doc.buffer_mut().set_path(path.to_path_buf());
    Ok(doc)
}

/// Write a document to disk, dispatching on the file extension.
///
/// `.txtp` gets the full [`encode`] output; every other extension
/// (including `.txt`) gets [`encode_plain`], dropping the records. On
/// success the buffer keeps the path and is marked saved.
///
/// # Errors
///
/// Returns [`Error::Io`] when the write fails.
pub fn save(doc: &mut Document, path: &Path) -> Result<(), Error> {
    let payload = if writes_metadata(path) {
        encode(doc)
    } else {
        encode_plain(doc)
    };
    fs::write(path, payload)?;
    doc.buffer_mut().set_path(path.to_path_buf());
    doc.buffer_mut().mark_saved();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
