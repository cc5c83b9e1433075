//! Struct declaration parsing.
//!
//! Handles both surface forms of an annotated struct:
//! `typedef struct tag? { ... } name;` and `struct tag { ... };`.

use log::debug;
use thin_vec::ThinVec;

use crate::parser::ast::{DeclKind, Declaration, Field, StructDecl};
use crate::parser::error::ParseError;
use crate::parser::{find_marker, Cursor, FIELD_MARKER, MAX_FIELDS};

/// Parses one annotated struct declaration. The cursor must sit just past
/// the struct marker; on success the returned cursor sits just past the
/// declaration's terminating semicolon.
pub(super) fn parse_struct(cursor: Cursor<'_>) -> Result<(Declaration, Cursor<'_>), ParseError> {
    let start = cursor.offset();

    let (cursor, is_typedef) = match cursor.accept_keyword("typedef") {
        Some(cur) => (cur, true),
        None => (cursor, false),
    };
    let cursor = cursor.expect_keyword("struct")?;

    // Optional tag name; mandatory when there is no typedef.
    let (tag, cursor) = cursor.read_identifier();
    let cursor = cursor.expect_char('{')?;

    let body_end = cursor.find("}").ok_or(ParseError::UnterminatedBody {
        kind: DeclKind::Struct,
        offset: start,
    })?;

    // Collect CF_FIELD() members inside the body. Anything between markers
    // is ignored.
    let mut fields = ThinVec::new();
    let mut cur = cursor;
    loop {
        let marker = match find_marker(cur, FIELD_MARKER) {
            Some(at) if at < body_end => at,
            _ => break,
        };
        if fields.len() >= MAX_FIELDS {
            return Err(ParseError::TooManyMembers {
                kind: DeclKind::Struct,
                offset: marker,
                limit: MAX_FIELDS,
            });
        }
        let (field, rest) = parse_field(cur.at(marker + FIELD_MARKER.len()))?;
        fields.push(field);
        cur = rest;
    }

    let cursor = cursor.at(body_end).expect_char('}')?;

    let (name, cursor) = if is_typedef {
        // typedef struct { ... } name;
        let (name, cursor) = cursor.read_identifier();
        if name.is_empty() {
            return Err(ParseError::MissingName {
                kind: DeclKind::Struct,
                offset: cursor.offset(),
            });
        }
        (name.to_string(), cursor.expect_char(';')?)
    } else {
        // struct tag { ... };  (an instance name before ';' is tolerated)
        if tag.is_empty() {
            return Err(ParseError::MissingName {
                kind: DeclKind::Struct,
                offset: cursor.offset(),
            });
        }
        let (_instance, cursor) = cursor.read_identifier();
        (tag.to_string(), cursor.expect_char(';')?)
    };

    debug!("parsed struct '{}' with {} field(s)", name, fields.len());
    Ok((Declaration::Struct(StructDecl { name, fields }), cursor))
}

/// Parses one field after its marker: a declared type identifier followed by
/// the field name, with an optional trailing semicolon.
fn parse_field(cursor: Cursor<'_>) -> Result<(Field, Cursor<'_>), ParseError> {
    let (type_name, cursor) = cursor.read_identifier();
    let (name, cursor) = cursor.read_identifier();
    if type_name.is_empty() || name.is_empty() {
        return Err(ParseError::IncompleteField {
            offset: cursor.offset(),
        });
    }

    let cursor = cursor.accept_char(';').unwrap_or(cursor);
    Ok((
        Field {
            name: name.to_string(),
            type_name: type_name.to_string(),
        },
        cursor,
    ))
}
