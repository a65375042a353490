// SPDX-License-Identifier: MIT
//
// tpad — a tiny tagged-text notepad, driven from stdin.
//
// This is the binary that wires the crates together:
//
//   tpad-core → buffer, positions, key events, capture, edit log, tags
//   tpad-txtp → .txtp load/save
//
// The App struct owns one Document plus the editing state around it:
// cursor, undo history, clipboard, highlight colour, font sizing, wrap
// flag. The shell is a line prompt; every command maps onto the same App
// method a GUI frontend would call, and key chords (Ctrl+Z and friends)
// arrive as synthetic KeyEvents through the same dispatch a real input
// layer would use:
//
//   stdin line → handle_line → App method → capture → history/buffer
//
// `pr` paints the buffer to the terminal with ANSI backgrounds standing in
// for the notepad's highlight colours; the selection renders inverse.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use tpad_core::capture::{capture_key, capture_paste};
use tpad_core::document::Document;
use tpad_core::history::History;
use tpad_core::key::{KeyCode, KeyEvent, Modifiers};
use tpad_core::position::{Position, Range};
use tpad_core::tags::{SEL, TagSet};

use tpad_txtp as txtp;

// ─── Highlight colours ──────────────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const INVERSE: &str = "\x1b[7m";

/// The four highlight colours the notepad offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    Yellow,
    Green,
    Cyan,
    Pink,
}

impl Highlight {
    const ALL: [Self; 4] = [Self::Yellow, Self::Green, Self::Cyan, Self::Pink];

    /// The tag name written into `.txtp` records.
    const fn tag(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Pink => "pink",
        }
    }

    /// ANSI background (with black foreground) used by `pr`.
    const fn ansi(self) -> &'static str {
        match self {
            Self::Yellow => "\x1b[43;30m",
            Self::Green => "\x1b[42;30m",
            Self::Cyan => "\x1b[46;30m",
            Self::Pink => "\x1b[45;30m",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "yellow" => Some(Self::Yellow),
            "green" => Some(Self::Green),
            "cyan" => Some(Self::Cyan),
            "pink" => Some(Self::Pink),
            _ => None,
        }
    }
}

// ─── Font sizing ────────────────────────────────────────────────────────────

const FONT_DEFAULT: i32 = 10;
const FONT_STEP: i32 = 2;
const FONT_RUN_LIMIT: u8 = 3;

/// Point-size state with a run limit: at most three consecutive steps in
/// the same direction take effect, further ones are ignored until a step
/// the other way resets the run.
#[derive(Debug, Clone, Copy)]
struct FontSizing {
    size: i32,
    raised: u8,
    lowered: u8,
}

impl FontSizing {
    const fn new() -> Self {
        Self {
            size: FONT_DEFAULT,
            raised: 0,
            lowered: 0,
        }
    }

    /// Apply one signed step. Returns whether the size actually changed.
    const fn step(&mut self, delta: i32) -> bool {
        if delta > 0 {
            if self.raised >= FONT_RUN_LIMIT {
                return false;
            }
            self.raised += 1;
            self.lowered = 0;
        } else if delta < 0 {
            if self.lowered >= FONT_RUN_LIMIT {
                return false;
            }
            self.lowered += 1;
            self.raised = 0;
        } else {
            return false;
        }
        self.size += delta;
        true
    }
}

// ─── App ────────────────────────────────────────────────────────────────────

/// The notepad application state.
///
/// Owns the document and everything editing needs around it. Methods keep
/// one invariant: `cursor` is always a valid insertion point in the buffer.
struct App {
    doc: Document,
    history: History,
    cursor: Position,

    /// Copy buffer for `y`/`p`. Plain text, replaced on every copy.
    clipboard: String,

    /// Colour applied by the next highlight command.
    highlight: Highlight,

    font: FontSizing,

    /// Line-wrapping hint for frontends; here it only shows in the status.
    wrap: bool,

    /// A message to print after the current command. Taken by the shell.
    message: Option<String>,
    message_is_error: bool,
}

impl App {
    /// Create an app with an empty document.
    fn new() -> Self {
        Self {
            doc: Document::new(),
            history: History::new(),
            cursor: Position::ZERO,
            clipboard: String::new(),
            highlight: Highlight::Yellow,
            font: FontSizing::new(),
            wrap: true,
            message: None,
            message_is_error: false,
        }
    }

    /// Create an app with a file loaded from disk. Exits the process when
    /// the file cannot be loaded.
    fn from_file(path: &str) -> Self {
        let mut app = Self::new();
        if let Err(e) = app.open(Path::new(path)) {
            eprintln!("tpad: {path}: {e}");
            process::exit(1);
        }
        app
    }

    // ── Messages ────────────────────────────────────────────────────────

    fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = false;
    }

    fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = true;
    }

    /// Take the pending message, if any, with its error flag.
    fn take_message(&mut self) -> Option<(String, bool)> {
        let msg = self.message.take()?;
        let is_error = self.message_is_error;
        self.message_is_error = false;
        Some((msg, is_error))
    }

    // ── Files ───────────────────────────────────────────────────────────

    /// Replace the document with the contents of `path`. On failure the
    /// current document, cursor, and history stay untouched; on success
    /// the history is cleared, since its positions belong to the old text.
    fn open(&mut self, path: &Path) -> Result<(), txtp::Error> {
        self.doc = txtp::load(path)?;
        self.cursor = Position::ZERO;
        self.history.clear();
        Ok(())
    }

    fn open_path(&mut self, path: &str) {
        match self.open(Path::new(path)) {
            Ok(()) => self.set_message(format!("{path} opened")),
            Err(e) => self.set_error(format!("{path}: {e}")),
        }
    }

    /// Write to `path_arg`, or to the document's own path when absent.
    fn save_to(&mut self, path_arg: Option<&str>) {
        let target = path_arg
            .map(PathBuf::from)
            .or_else(|| self.doc.buffer().path().map(Path::to_path_buf));
        let Some(path) = target else {
            self.set_error("no file name (use: w PATH)");
            return;
        };
        match txtp::save(&mut self.doc, &path) {
            Ok(()) => self.set_message(format!("{} written", path.display())),
            Err(e) => self.set_error(format!("{}: {e}", path.display())),
        }
    }

    // ── Key handling ────────────────────────────────────────────────────

    /// Feed one key event through chord dispatch, capture, and mutation.
    fn on_key(&mut self, event: &KeyEvent) {
        // Chorded keys are commands, never text.
        if event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            if event.modifiers.contains(Modifiers::CTRL) {
                if let KeyCode::Char(ch) = event.code {
                    match ch.to_ascii_lowercase() {
                        'z' => self.undo(),
                        'y' => self.redo(),
                        'a' => self.select_all(),
                        'c' => self.copy(),
                        'v' => self.paste(),
                        _ => {}
                    }
                }
            }
            return;
        }

        match event.code {
            KeyCode::Char(_)
            | KeyCode::Enter
            | KeyCode::Tab
            | KeyCode::Backspace
            | KeyCode::Delete => self.edit_key(event),
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => self.move_cursor(event.code),
            KeyCode::Escape => {}
        }
    }

    /// A key that mutates the buffer. Capture runs first, against the
    /// pre-mutation snapshot, so the recorded character is the one that
    /// actually appears or disappears.
    fn edit_key(&mut self, event: &KeyEvent) {
        if let Some(edit) = capture_key(event, self.doc.buffer(), self.cursor) {
            self.history.record(edit);
        }

        match event.code {
            KeyCode::Char(ch) => self.insert_char_at_cursor(ch),
            KeyCode::Enter => self.insert_char_at_cursor('\n'),
            KeyCode::Tab => self.insert_char_at_cursor('\t'),
            KeyCode::Backspace => {
                if let Some(prev) = self.doc.buffer().offset(self.cursor, -1) {
                    self.doc.buffer_mut().delete(Range::new(prev, self.cursor));
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if let Some(next) = self.doc.buffer().offset(self.cursor, 1) {
                    self.doc.buffer_mut().delete(Range::new(self.cursor, next));
                }
            }
            _ => {}
        }
    }

    fn insert_char_at_cursor(&mut self, ch: char) {
        self.doc.buffer_mut().insert_char(self.cursor, ch);
        if let Some(next) = self.doc.buffer().offset(self.cursor, 1) {
            self.cursor = next;
        }
    }

    /// Type a string as individual keystrokes, letting capture decide what
    /// each one records.
    fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.on_key(&KeyEvent::char(ch));
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let buf = self.doc.buffer();
        self.cursor = match code {
            KeyCode::Left => buf.offset(self.cursor, -1).unwrap_or(self.cursor),
            KeyCode::Right => buf.offset(self.cursor, 1).unwrap_or(self.cursor),
            KeyCode::Up => {
                if self.cursor.line == 0 {
                    self.cursor
                } else {
                    buf.clamp_position(Position::new(self.cursor.line - 1, self.cursor.col))
                }
            }
            KeyCode::Down => {
                buf.clamp_position(Position::new(self.cursor.line + 1, self.cursor.col))
            }
            KeyCode::Home => Position::new(self.cursor.line, 0),
            KeyCode::End => Position::new(
                self.cursor.line,
                buf.line_content_len(self.cursor.line).unwrap_or(0),
            ),
            _ => self.cursor,
        };
    }

    // ── Undo / redo ─────────────────────────────────────────────────────

    fn undo(&mut self) {
        if self.history.undo(self.doc.buffer_mut()) {
            self.cursor = self.doc.buffer().clamp_position(self.cursor);
            self.set_message("undo");
        } else {
            self.set_message("nothing to undo");
        }
    }

    fn redo(&mut self) {
        if self.history.redo(self.doc.buffer_mut()) {
            self.cursor = self.doc.buffer().clamp_position(self.cursor);
            self.set_message("redo");
        } else {
            self.set_message("nothing to redo");
        }
    }

    // ── Selection & clipboard ───────────────────────────────────────────

    /// Select the whole buffer and park the cursor at the start.
    fn select_all(&mut self) {
        let end = self.doc.buffer().end_position();
        let tags = self.doc.tags_mut();
        tags.remove(SEL);
        tags.add_range(SEL, Position::ZERO, end);
        self.cursor = Position::ZERO;
        self.set_message(format!("selected {}", Range::new(Position::ZERO, end)));
    }

    /// The first selection range, if it spans anything. A reversed or
    /// empty pair counts as no selection.
    fn selection(&self) -> Option<Range> {
        let &(start, end) = self.doc.tags().ranges_of(SEL).first()?;
        if start >= end {
            return None;
        }
        Some(Range::new(start, end))
    }

    fn copy(&mut self) {
        let text = self
            .selection()
            .and_then(|range| self.doc.buffer().slice(range))
            .map(|slice| slice.to_string());
        match text {
            Some(t) => {
                let n = t.chars().count();
                self.clipboard = t;
                self.set_message(format!("copied {n} chars"));
            }
            None => self.set_message("nothing selected"),
        }
    }

    /// Insert the clipboard at the cursor as a single recorded edit.
    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.set_message("clipboard is empty");
            return;
        }
        let Some(idx) = self.doc.buffer().pos_to_char_idx(self.cursor) else {
            return;
        };
        let text = self.clipboard.clone();
        if let Some(edit) = capture_paste(self.cursor, &text) {
            self.history.record(edit);
        }
        self.doc.buffer_mut().insert(self.cursor, &text);
        self.cursor = self
            .doc
            .buffer()
            .char_idx_to_pos(idx + text.chars().count())
            .unwrap_or_else(|| self.doc.buffer().end_position());
        self.set_message(format!("pasted {} chars", text.chars().count()));
    }

    // ── Highlighting ────────────────────────────────────────────────────

    /// Copy the selection into the current colour's tag.
    fn apply_highlight(&mut self) {
        let Some(range) = self.selection() else {
            self.set_message("nothing selected");
            return;
        };
        self.doc
            .tags_mut()
            .add_range(self.highlight.tag(), range.start, range.end);
        self.set_message(format!("highlighted {range} {}", self.highlight.tag()));
    }

    /// Switch colour, then highlight the selection with it.
    fn highlight_with(&mut self, name: &str) {
        match Highlight::from_name(name) {
            Some(colour) => {
                self.highlight = colour;
                self.apply_highlight();
            }
            None => self.set_error(format!(
                "unknown colour {name:?} (yellow, green, cyan, pink)"
            )),
        }
    }

    // ── Font & wrap ─────────────────────────────────────────────────────

    fn font_step(&mut self, delta: i32) {
        if self.font.step(delta) {
            self.set_message(format!("font size {}", self.font.size));
        } else {
            self.set_message(format!("font size stays {}", self.font.size));
        }
    }

    fn toggle_wrap(&mut self) {
        self.wrap = !self.wrap;
        self.set_message(if self.wrap { "wrap on" } else { "wrap off" });
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// One status line: file name, dirty marker, cursor, line count.
    fn status(&self) -> String {
        let buf = self.doc.buffer();
        let name = buf
            .path()
            .map_or_else(|| "[no name]".to_string(), |p| p.display().to_string());
        let dirty = if buf.is_modified() { " [+]" } else { "" };
        let wrap = if self.wrap { "" } else { "  [nowrap]" };
        format!(
            "{name}{dirty}  {}  {} lines{wrap}",
            self.cursor,
            buf.line_count()
        )
    }

    /// Paint the buffer with ANSI backgrounds for highlighted spans and
    /// inverse video for the selection.
    fn render(&self) -> String {
        let buf = self.doc.buffer();
        if buf.is_empty() {
            return String::new();
        }

        let last = buf.line_count() - 1;
        let mut out = String::new();
        for line_idx in 0..=last {
            let content_len = buf.line_content_len(line_idx).unwrap_or(0);
            // A final newline leaves a phantom empty line; don't print it.
            if line_idx == last && last > 0 && content_len == 0 {
                break;
            }
            let Some(line) = buf.line(line_idx) else {
                break;
            };
            for (col, ch) in line.chars().take(content_len).enumerate() {
                match style_at(self.doc.tags(), Position::new(line_idx, col)) {
                    Some(style) => {
                        out.push_str(style);
                        out.push(ch);
                        out.push_str(RESET);
                    }
                    None => out.push(ch),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// The style covering a position: selection beats colours, colours apply
/// in their fixed order. Reversed pairs cover nothing.
fn style_at(tags: &TagSet, pos: Position) -> Option<&'static str> {
    let covers = |name: &str| {
        tags.ranges_of(name)
            .iter()
            .any(|&(start, end)| start < end && Range::new(start, end).contains(pos))
    };

    if covers(SEL) {
        return Some(INVERSE);
    }
    Highlight::ALL
        .iter()
        .find(|colour| covers(colour.tag()))
        .map(|colour| colour.ansi())
}

// ─── Shell ──────────────────────────────────────────────────────────────────

const HELP: &str = "\
  o PATH        open a file (.txt/.txtp parse highlight records)
  w [PATH]      write the file (.txtp keeps highlights)
  t TEXT        type text at the cursor
  ret tab bs del                press Enter, Tab, Backspace, Delete
  left right up down home end   move the cursor
  u  r          undo, redo
  sel           select the whole buffer
  y  p          copy the selection, paste the clipboard
  hl [COLOUR]   highlight the selection (yellow green cyan pink)
  font + | -    grow or shrink the font size
  wrap          toggle line wrapping
  pr            print the buffer with highlights
  st            status line
  q  q!         quit, quit discarding changes";

/// What the shell loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Dispatch one prompt line. Messages are left on the app for the loop to
/// print; multi-line output (`pr`, `h`) goes straight to stdout.
fn handle_line(app: &mut App, line: &str) -> Flow {
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue;
    }
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        "o" | "open" => {
            if arg.is_empty() {
                app.set_error("usage: o PATH");
            } else {
                app.open_path(arg);
            }
        }
        "w" | "write" => app.save_to((!arg.is_empty()).then_some(arg)),
        "t" | "type" => app.type_str(arg),
        "ret" => app.on_key(&KeyEvent::plain(KeyCode::Enter)),
        "tab" => app.on_key(&KeyEvent::plain(KeyCode::Tab)),
        "bs" => app.on_key(&KeyEvent::plain(KeyCode::Backspace)),
        "del" => app.on_key(&KeyEvent::plain(KeyCode::Delete)),
        "left" => app.on_key(&KeyEvent::plain(KeyCode::Left)),
        "right" => app.on_key(&KeyEvent::plain(KeyCode::Right)),
        "up" => app.on_key(&KeyEvent::plain(KeyCode::Up)),
        "down" => app.on_key(&KeyEvent::plain(KeyCode::Down)),
        "home" => app.on_key(&KeyEvent::plain(KeyCode::Home)),
        "end" => app.on_key(&KeyEvent::plain(KeyCode::End)),
        "u" | "undo" => app.undo(),
        "r" | "redo" => app.redo(),
        "sel" => app.select_all(),
        "y" | "copy" => app.copy(),
        "p" | "paste" => app.paste(),
        "hl" => {
            if arg.is_empty() {
                app.apply_highlight();
            } else {
                app.highlight_with(arg);
            }
        }
        "font" => match arg {
            "+" => app.font_step(FONT_STEP),
            "-" => app.font_step(-FONT_STEP),
            _ => app.set_error("usage: font + | font -"),
        },
        "wrap" => app.toggle_wrap(),
        "pr" | "print" => print!("{}", app.render()),
        "st" | "status" => {
            let status = app.status();
            app.set_message(status);
        }
        "h" | "help" => println!("{HELP}"),
        "q" | "quit" => {
            if app.doc.buffer().is_modified() {
                app.set_error("unsaved changes (use q! to discard)");
            } else {
                return Flow::Quit;
            }
        }
        "q!" => return Flow::Quit,
        _ => app.set_error(format!("unknown command: {cmd} (h for help)")),
    }
    Flow::Continue
}

fn run(app: &mut App) -> io::Result<()> {
    let mut stdin = io::stdin().lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(()); // EOF
        }
        if handle_line(app, &line) == Flow::Quit {
            return Ok(());
        }
        if let Some((msg, is_error)) = app.take_message() {
            if is_error {
                println!("error: {msg}");
            } else {
                println!("{msg}");
            }
        }
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut app = if args.len() > 1 {
        App::from_file(&args[1])
    } else {
        App::new()
    };

    println!("tpad (h for help)");
    if let Err(e) = run(&mut app) {
        eprintln!("tpad: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
