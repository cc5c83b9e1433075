//! Enum declaration parsing.
//!
//! Every comma-separated item in the body is an enumerator. Values follow
//! C semantics: an explicit `= <integer>` sets the value and the implicit
//! sequence resumes from it; otherwise each enumerator takes one more than
//! the previous one, starting from 0.

use log::debug;
use thin_vec::ThinVec;

use crate::parser::ast::{DeclKind, Declaration, EnumDecl, EnumValue};
use crate::parser::error::ParseError;
use crate::parser::{Cursor, MAX_ENUM_VALUES};

/// Parses one annotated enum declaration. The cursor must sit just past the
/// enum marker; on success the returned cursor sits just past the
/// declaration's terminating semicolon.
pub(super) fn parse_enum(cursor: Cursor<'_>) -> Result<(Declaration, Cursor<'_>), ParseError> {
    let start = cursor.offset();

    let (cursor, is_typedef) = match cursor.accept_keyword("typedef") {
        Some(cur) => (cur, true),
        None => (cursor, false),
    };
    let cursor = cursor.expect_keyword("enum")?;

    let (tag, cursor) = cursor.read_identifier();
    let cursor = cursor.expect_char('{')?;

    let body_end = cursor.find("}").ok_or(ParseError::UnterminatedBody {
        kind: DeclKind::Enum,
        offset: start,
    })?;

    let mut values = ThinVec::new();
    let mut next_implicit: i32 = 0;
    let mut cur = cursor;
    while cur.offset() < body_end {
        let value_end = match cur.find(",") {
            Some(at) if at < body_end => at,
            _ => body_end,
        };
        parse_enumerator(cur, value_end, &mut values, &mut next_implicit)?;
        cur = cur.at(value_end);
        if let Some(past_comma) = cur.accept_char(',') {
            cur = past_comma;
        }
    }

    let cursor = cursor.at(body_end).expect_char('}')?;

    let (name, cursor) = if is_typedef {
        // typedef enum { ... } name;
        let (name, cursor) = cursor.read_identifier();
        if name.is_empty() {
            return Err(ParseError::MissingName {
                kind: DeclKind::Enum,
                offset: cursor.offset(),
            });
        }
        (name.to_string(), cursor.expect_char(';')?)
    } else {
        // enum tag { ... };  (an instance name before ';' is tolerated)
        if tag.is_empty() {
            return Err(ParseError::MissingName {
                kind: DeclKind::Enum,
                offset: cursor.offset(),
            });
        }
        let (_instance, cursor) = cursor.read_identifier();
        (tag.to_string(), cursor.expect_char(';')?)
    };

    debug!("parsed enum '{}' with {} value(s)", name, values.len());
    Ok((Declaration::Enum(EnumDecl { name, values }), cursor))
}

/// Parses one enumerator between `cursor` and `value_end` (the next comma or
/// the closing brace). An item that is empty after trimming is skipped
/// without counting and without touching the implicit counter.
fn parse_enumerator(
    cursor: Cursor<'_>,
    value_end: usize,
    values: &mut ThinVec<EnumValue>,
    next_implicit: &mut i32,
) -> Result<(), ParseError> {
    let (name, cursor) = cursor.read_identifier();
    if name.is_empty() {
        return Ok(());
    }

    if values.len() >= MAX_ENUM_VALUES {
        return Err(ParseError::TooManyMembers {
            kind: DeclKind::Enum,
            offset: cursor.offset(),
            limit: MAX_ENUM_VALUES,
        });
    }

    let value = match cursor.accept_char('=') {
        Some(cur) => {
            let literal = cur.slice_to(value_end).trim();
            literal
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidEnumValue {
                    text: literal.to_string(),
                    offset: cur.offset(),
                })?
        }
        None => *next_implicit,
    };
    *next_implicit = value.wrapping_add(1);

    values.push(EnumValue {
        name: name.to_string(),
        value,
    });
    Ok(())
}
