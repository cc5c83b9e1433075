//! The type model produced by a parsing run.
//!
//! Declarations are appended in discovery order and never mutated afterwards;
//! the whole model is handed to the emitter once every source unit has been
//! scanned.

use std::fmt;
use thin_vec::ThinVec;

/// Discriminates the two kinds of reflected declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Struct,
    Enum,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Struct => write!(f, "struct"),
            DeclKind::Enum => write!(f, "enum"),
        }
    }
}

/// One field of a reflected struct. `type_name` is the raw identifier token
/// as written in source; resolving it to another declaration is the
/// emitter's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
}

/// One enumerator of a reflected enum, with its resolved integer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i32,
}

/// A parsed struct declaration. Field order is source order and determines
/// the layout downstream consumers expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: ThinVec<Field>,
}

impl StructDecl {
    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A parsed enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub values: ThinVec<EnumValue>,
}

impl EnumDecl {
    /// Finds an enumerator by name.
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Finds an enumerator by its resolved integer value.
    pub fn value_by_value(&self, value: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// One parsed declaration, struct or enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Struct(StructDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Struct(s) => &s.name,
            Declaration::Enum(e) => &e.name,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Struct(_) => DeclKind::Struct,
            Declaration::Enum(_) => DeclKind::Enum,
        }
    }
}

/// The ordered collection of declarations accumulated across all processed
/// source units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeModel {
    pub types: Vec<Declaration>,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn push(&mut self, decl: Declaration) {
        self.types.push(decl);
    }

    /// Finds a declaration by its externally-visible name.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.types.iter().find(|d| d.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thin_vec::thin_vec;

    fn sample_model() -> TypeModel {
        let mut model = TypeModel::new();
        model.push(Declaration::Struct(StructDecl {
            name: "player_t".to_string(),
            fields: thin_vec![
                Field {
                    name: "power".to_string(),
                    type_name: "int32_t".to_string(),
                },
                Field {
                    name: "health".to_string(),
                    type_name: "float".to_string(),
                },
            ],
        }));
        model.push(Declaration::Enum(EnumDecl {
            name: "color_t".to_string(),
            values: thin_vec![
                EnumValue {
                    name: "COLOR_RED".to_string(),
                    value: 0,
                },
                EnumValue {
                    name: "COLOR_BLUE".to_string(),
                    value: 7,
                },
            ],
        }));
        model
    }

    #[test]
    fn test_find_declaration_by_name() {
        let model = sample_model();
        let decl = model.find("player_t").unwrap();
        assert_eq!(decl.kind(), DeclKind::Struct);
        assert_eq!(decl.name(), "player_t");
        assert!(model.find("no_such_type").is_none());
    }

    #[test]
    fn test_find_field() {
        let model = sample_model();
        let Declaration::Struct(s) = model.find("player_t").unwrap() else {
            panic!("expected struct");
        };
        let field = s.field("health").unwrap();
        assert_eq!(field.type_name, "float");
        assert!(s.field("missing").is_none());
    }

    #[test]
    fn test_find_enum_value() {
        let model = sample_model();
        let Declaration::Enum(e) = model.find("color_t").unwrap() else {
            panic!("expected enum");
        };
        assert_eq!(e.value_by_name("COLOR_BLUE").unwrap().value, 7);
        assert_eq!(e.value_by_value(0).unwrap().name, "COLOR_RED");
        assert!(e.value_by_name("COLOR_GREEN").is_none());
        assert!(e.value_by_value(42).is_none());
    }
}
