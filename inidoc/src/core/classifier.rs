//! Line classification and the parsing state machine.
//!
//! Each line is classified on its own by [`classify_line`], in fixed priority
//! order:
//!
//! 1. empty line or `;` in the first column: skipped
//! 2. `[name]`: section header (from the first `[` to the first `]`)
//! 3. `key=value`: split on the first `=`, key trimmed, value kept raw
//! 4. anything else: ignored
//!
//! [`Classifier`] then applies the classified lines to a document. Pairs are
//! anchored to the most recent header; a pair before any header is a fault
//! ([`IniError::UnanchoredKeyValue`]), never silently dropped. A header whose
//! name is blank opens no section, and the pairs under it are discarded with
//! a warning until the next header.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::core::document::IniDocument;
use crate::core::section::IniSection;
use crate::core::value::IniValue;
use crate::error::{IniError, Result};

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]").unwrap());
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^\r\n=]+)=(.*)$").unwrap());

/// Grammar role of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// Captured name, verbatim.
    Header(&'a str),
    /// Trimmed key and raw value.
    Pair { key: &'a str, value: &'a str },
    Unrecognized,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(';') {
        return LineKind::Comment;
    }
    if let Some(caps) = HEADER_RE.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        return LineKind::Header(name);
    }
    if let Some(caps) = PAIR_RE.captures(line) {
        let key = caps.get(1).map_or("", |m| m.as_str()).trim();
        let value = caps.get(2).map_or("", |m| m.as_str());
        return LineKind::Pair { key, value };
    }
    LineKind::Unrecognized
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    NoCurrentSection,
    InSection(String),
    /// Under a header that could not become a section.
    Discarding,
}

/// Parsing state machine that builds an [`IniDocument`] one line at a time.
#[derive(Debug)]
pub struct Classifier {
    doc: IniDocument,
    state: State,
    line_no: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            doc: IniDocument::new(),
            state: State::NoCurrentSection,
            line_no: 0,
        }
    }

    /// Name of the section pairs are currently added to.
    pub fn current_section(&self) -> Option<&str> {
        match &self.state {
            State::NoCurrentSection | State::Discarding => None,
            State::InSection(name) => Some(name),
        }
    }

    /// Consume the next line. Lines are numbered from 1 in feed order.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;
        let kind = classify_line(line);
        trace!(line = self.line_no, ?kind, "classified line");
        match kind {
            LineKind::Blank | LineKind::Comment | LineKind::Unrecognized => Ok(()),
            LineKind::Header(name) => self.open_section(name),
            LineKind::Pair { key, value } => self.add_pair(key, value),
        }
    }

    pub fn finish(self) -> IniDocument {
        debug!(
            lines = self.line_no,
            sections = self.doc.len(),
            pairs = self.doc.pair_count(),
            "parsed document"
        );
        self.doc
    }

    fn open_section(&mut self, name: &str) -> Result<()> {
        let section = match IniSection::from_header(name) {
            Ok(section) => section,
            Err(err) => {
                warn!(line = self.line_no, %err, "skipping unusable header and its pairs");
                self.state = State::Discarding;
                return Ok(());
            }
        };
        self.doc.add(section).map_err(|err| match err {
            IniError::DuplicateSection { name } => IniError::DuplicateSectionAt {
                name,
                line: self.line_no,
            },
            other => other,
        })?;
        self.state = State::InSection(name.to_string());
        Ok(())
    }

    fn add_pair(&mut self, key: &str, value: &str) -> Result<()> {
        let current = match &self.state {
            State::InSection(current) => current,
            State::NoCurrentSection => {
                return Err(IniError::UnanchoredKeyValue { line: self.line_no });
            }
            State::Discarding => {
                warn!(line = self.line_no, key, "skipping pair under unusable header");
                return Ok(());
            }
        };
        let section = self.doc.section_mut(current)?;
        let value = IniValue::new(value)?;
        match section.insert(key, value) {
            Ok(()) => Ok(()),
            Err(IniError::DuplicateKey { section, key }) => Err(IniError::DuplicateKeyAt {
                section,
                key,
                line: self.line_no,
            }),
            Err(err) => {
                warn!(line = self.line_no, %err, "skipping unusable pair");
                Ok(())
            }
        }
    }
}

/// Run every line of `text` through a fresh [`Classifier`].
pub fn parse_str(text: &str) -> Result<IniDocument> {
    let mut classifier = Classifier::new();
    for line in lines(text) {
        classifier.feed(line)?;
    }
    Ok(classifier.finish())
}
