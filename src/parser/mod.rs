//! Annotation scanning and declaration parsing.
//!
//! The scanner walks the raw text of one source unit looking for annotation
//! markers and hands the text just past each marker to the matching
//! declaration parser. Everything between markers is ignored, so headers can
//! contain arbitrary unannotated code.

use log::debug;

use crate::parser::ast::TypeModel;
use crate::parser::error::ParseError;

pub mod ast;
pub mod error;

mod enum_parsing;
mod struct_parsing;

/// Marker that announces an annotated struct declaration.
pub const STRUCT_MARKER: &str = "CF_STRUCT()";
/// Marker that announces an annotated enum declaration.
pub const ENUM_MARKER: &str = "CF_ENUM()";
/// Marker that announces one field inside an annotated struct body.
pub const FIELD_MARKER: &str = "CF_FIELD()";

/// Longest identifier kept for a member or declaration name. Longer
/// identifiers are truncated, never an error.
pub const MAX_NAME_LENGTH: usize = 256;
/// Most fields accepted in one struct declaration.
pub const MAX_FIELDS: usize = 64;
/// Most enumerators accepted in one enum declaration.
pub const MAX_ENUM_VALUES: usize = 128;
/// Most declarations accepted in one run.
pub const MAX_USER_TYPES: usize = 128;

fn is_identifier_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// An immutable view into one source unit's text with an explicit byte
/// position. Cursors are cheap to copy; parsing functions take one by value
/// and return the advanced position.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'src> {
    text: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset into the source unit.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn advance(mut self, n: usize) -> Self {
        self.pos = (self.pos + n).min(self.text.len());
        self
    }

    /// Repositions the cursor at an absolute byte offset.
    fn at(self, offset: usize) -> Self {
        Self {
            text: self.text,
            pos: offset.min(self.text.len()),
        }
    }

    /// The source text between this cursor and an absolute end offset.
    fn slice_to(&self, end: usize) -> &'src str {
        &self.text[self.pos..end.max(self.pos)]
    }

    /// Advances past ASCII whitespace. Idempotent when there is none.
    pub fn skip_whitespace(mut self) -> Self {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        self
    }

    /// Reads a maximal run of identifier characters at the
    /// whitespace-skipped position. Returns an empty identifier, cursor
    /// unchanged past the whitespace, when the position does not start one.
    /// Names longer than [`MAX_NAME_LENGTH`] are truncated, but the cursor
    /// still advances past the whole run.
    pub fn read_identifier(self) -> (&'src str, Self) {
        let mut cur = self.skip_whitespace();
        let start = cur.pos;
        while let Some(b) = cur.peek() {
            if !is_identifier_byte(b) {
                break;
            }
            cur.pos += 1;
        }
        let end = cur.pos.min(start + MAX_NAME_LENGTH);
        (&cur.text[start..end], cur)
    }

    /// Consumes `keyword` after skipping whitespace. The keyword must be
    /// followed by a non-identifier character, so a longer identifier with
    /// the keyword as a prefix never matches.
    pub fn expect_keyword(self, keyword: &'static str) -> Result<Self, ParseError> {
        let cur = self.skip_whitespace();
        let rest = &cur.text.as_bytes()[cur.pos..];
        let kw = keyword.as_bytes();
        let bounded = !rest.get(kw.len()).copied().is_some_and(is_identifier_byte);
        if rest.starts_with(kw) && bounded {
            Ok(cur.advance(kw.len()))
        } else {
            Err(ParseError::ExpectedKeyword {
                keyword,
                offset: cur.pos,
            })
        }
    }

    /// Non-failing form of [`expect_keyword`](Self::expect_keyword).
    pub fn accept_keyword(self, keyword: &'static str) -> Option<Self> {
        self.expect_keyword(keyword).ok()
    }

    /// Consumes exactly one expected character after skipping whitespace.
    pub fn expect_char(self, expected: char) -> Result<Self, ParseError> {
        let cur = self.skip_whitespace();
        if cur.peek() == Some(expected as u8) {
            Ok(cur.advance(1))
        } else {
            Err(ParseError::ExpectedChar {
                expected,
                offset: cur.pos,
            })
        }
    }

    /// Non-failing form of [`expect_char`](Self::expect_char).
    pub fn accept_char(self, expected: char) -> Option<Self> {
        self.expect_char(expected).ok()
    }

    /// Absolute offset of the next occurrence of `needle` at or after the
    /// cursor.
    fn find(&self, needle: &str) -> Option<usize> {
        let haystack = &self.text.as_bytes()[self.pos..];
        let needle = needle.as_bytes();
        if haystack.len() < needle.len() {
            return None;
        }
        haystack
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|i| self.pos + i)
    }
}

/// The two declaration markers the scanner dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Struct,
    Enum,
}

/// Finds the next whole-token occurrence of `marker` at or after `cursor`.
/// An occurrence preceded by an identifier character is part of a longer,
/// unrelated identifier and is skipped.
fn find_marker(cursor: Cursor<'_>, marker: &str) -> Option<usize> {
    let mut cur = cursor;
    loop {
        let at = cur.find(marker)?;
        let glued = at > 0 && is_identifier_byte(cursor.text.as_bytes()[at - 1]);
        if !glued {
            return Some(at);
        }
        cur = cur.at(at + 1);
    }
}

/// Earliest declaration marker remaining in the unit, if any.
fn next_marker(cursor: Cursor<'_>) -> Option<(usize, MarkerKind)> {
    let next_struct = find_marker(cursor, STRUCT_MARKER);
    let next_enum = find_marker(cursor, ENUM_MARKER);
    match (next_struct, next_enum) {
        (Some(s), Some(e)) if s < e => Some((s, MarkerKind::Struct)),
        (Some(s), None) => Some((s, MarkerKind::Struct)),
        (_, Some(e)) => Some((e, MarkerKind::Enum)),
        (None, None) => None,
    }
}

/// Scans one source unit and appends every annotated declaration to `model`.
///
/// Declarations completed before a later parse failure in the same unit stay
/// in the model; there is no per-unit rollback.
pub fn scan_unit(text: &str, model: &mut TypeModel) -> Result<(), ParseError> {
    let mut cursor = Cursor::new(text);

    while let Some((at, kind)) = next_marker(cursor) {
        if model.len() >= MAX_USER_TYPES {
            return Err(ParseError::TooManyTypes {
                limit: MAX_USER_TYPES,
            });
        }

        let (decl, rest) = match kind {
            MarkerKind::Struct => {
                struct_parsing::parse_struct(cursor.at(at + STRUCT_MARKER.len()))?
            }
            MarkerKind::Enum => enum_parsing::parse_enum(cursor.at(at + ENUM_MARKER.len()))?,
        };

        debug!("parsed {} '{}'", decl.kind(), decl.name());
        model.push(decl);
        cursor = rest;
    }

    Ok(())
}
