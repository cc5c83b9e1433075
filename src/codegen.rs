//! Emission of the generated reflection tables.
//!
//! Produces a `.h`/`.c` pair in the shape the cflex runtime consumes: one
//! `cf_type_t` entry per primitive and per parsed declaration, a global type
//! table, and a registration function named after the module.

use crate::parser::ast::{Declaration, EnumDecl, StructDecl, TypeModel};

/// The fixed primitive set every generated table starts with:
/// (C type name, generated symbol suffix, `cf_prim_t` enumerator).
const PRIMITIVES: &[(&str, &str, &str)] = &[
    ("void", "void", "CF_PRIM_VOID"),
    ("bool", "bool", "CF_PRIM_BOOL"),
    ("char", "char", "CF_PRIM_CHAR"),
    ("int8_t", "i8", "CF_PRIM_I8"),
    ("int16_t", "i16", "CF_PRIM_I16"),
    ("int32_t", "i32", "CF_PRIM_I32"),
    ("int64_t", "i64", "CF_PRIM_I64"),
    ("uint8_t", "u8", "CF_PRIM_U8"),
    ("uint16_t", "u16", "CF_PRIM_U16"),
    ("uint32_t", "u32", "CF_PRIM_U32"),
    ("uint64_t", "u64", "CF_PRIM_U64"),
    ("float", "f32", "CF_PRIM_F32"),
    ("double", "f64", "CF_PRIM_F64"),
    ("const char*", "cstr", "CF_PRIM_CSTR"),
];

/// Symbol of the `cf_type_t` describing `type_name`: a primitive maps to its
/// fixed suffix, anything else is assumed to be another reflected type.
fn type_symbol(type_name: &str) -> String {
    for (c_name, suffix, _) in PRIMITIVES {
        if *c_name == type_name {
            return format!("cf_type_{suffix}");
        }
    }
    format!("cf_type_{type_name}")
}

fn upper_ident(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Generates the public header: the type-id enum and the registration
/// function prototype.
pub fn generate_header(model: &TypeModel, module: &str) -> String {
    let guard = format!("{}_GENERATED_H", upper_ident(module));
    let mut out = String::new();

    out.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    out.push_str("// Generated by cflect. Do not edit.\n\n");

    out.push_str("typedef enum cf_type_id_t\n{\n");
    for (_, suffix, _) in PRIMITIVES {
        out.push_str(&format!("    CF_TYPE_ID_{},\n", upper_ident(suffix)));
    }
    for decl in &model.types {
        out.push_str(&format!("    CF_TYPE_ID_{},\n", upper_ident(decl.name())));
    }
    out.push_str("    CF_TYPE_ID_COUNT\n} cf_type_id_t;\n\n");

    out.push_str(&format!("void {module}_register_types( void );\n\n"));
    out.push_str(&format!("#endif // {guard}\n"));
    out
}

/// Generates the source file with the type definitions, the global type
/// table and the registration function. `includes` are the headers the
/// reflected declarations came from.
pub fn generate_source(model: &TypeModel, module: &str, includes: &[String]) -> String {
    let mut out = String::new();

    out.push_str("// Generated by cflect. Do not edit.\n\n");
    out.push_str("#include \"cflex.h\"\n");
    for include in includes {
        out.push_str(&format!("#include \"{include}\"\n"));
    }
    out.push_str("#include <stddef.h> // For offsetof\n\n");

    // Forward declarations so fields may reference types in any order.
    out.push_str("// -- Forward declarations for all type definitions --\n");
    for (_, suffix, _) in PRIMITIVES {
        out.push_str(&format!("static const cf_type_t cf_type_{suffix};\n"));
    }
    for decl in &model.types {
        out.push_str(&format!("static const cf_type_t cf_type_{};\n", decl.name()));
    }
    out.push('\n');

    out.push_str("// -- Generated Primitive Types --\n");
    for (c_name, suffix, prim) in PRIMITIVES {
        if *suffix == "void" {
            out.push_str(
                "static const cf_type_t cf_type_void = { .name = \"void\", .kind = CF_KIND_PRIMITIVE, .size = 0, .align = 0, .prim = CF_PRIM_VOID };\n",
            );
        } else {
            out.push_str(&format!(
                "static const cf_type_t cf_type_{suffix} = {{ .name = \"{c_name}\", .kind = CF_KIND_PRIMITIVE, .size = sizeof({c_name}), .align = _Alignof({c_name}), .prim = {prim} }};\n",
            ));
        }
    }
    out.push('\n');

    for decl in &model.types {
        match decl {
            Declaration::Struct(s) => emit_struct(&mut out, s),
            Declaration::Enum(e) => emit_enum(&mut out, e),
        }
    }

    out.push_str("// -- Global Type Table --\n");
    out.push_str("static const cf_type_t* cf_type_array[] = {\n");
    for (_, suffix, _) in PRIMITIVES {
        out.push_str(&format!("    &cf_type_{suffix},\n"));
    }
    for decl in &model.types {
        out.push_str(&format!("    &cf_type_{},\n", decl.name()));
    }
    out.push_str("};\n");
    out.push_str(
        "static const int32_t cf_type_count = sizeof(cf_type_array) / sizeof(cf_type_array[0]);\n\n",
    );

    out.push_str(&format!(
        "void\n{module}_register_types( void )\n{{\n    cf_register_type_table( cf_type_array, cf_type_count );\n}}\n",
    ));
    out
}

fn emit_struct(out: &mut String, s: &StructDecl) {
    let name = &s.name;
    out.push_str(&format!("// -- Generated Struct: {name} --\n"));

    let (array, count) = if s.fields.is_empty() {
        ("NULL".to_string(), 0)
    } else {
        out.push_str(&format!("static const cf_field_t cf_{name}_fields[] = {{\n"));
        for field in &s.fields {
            out.push_str(&format!(
                "    {{ \"{}\", &{}, offsetof({name}, {}), 0 }},\n",
                field.name,
                type_symbol(&field.type_name),
                field.name,
            ));
        }
        out.push_str("};\n");
        (format!("cf_{name}_fields"), s.fields.len())
    };

    out.push_str(&format!(
        "static const cf_type_t cf_type_{name} = {{ .name = \"{name}\", .kind = CF_KIND_STRUCT, .size = sizeof({name}), .align = _Alignof({name}), .struct_array = {array}, .struct_count = {count}, .struct_parent = NULL, .struct_is_anonymous = false }};\n\n",
    ));
}

fn emit_enum(out: &mut String, e: &EnumDecl) {
    let name = &e.name;
    out.push_str(&format!("// -- Generated Enum: {name} --\n"));

    let (array, count) = if e.values.is_empty() {
        ("NULL".to_string(), 0)
    } else {
        out.push_str(&format!(
            "static const cf_enum_value_t cf_{name}_values[] = {{\n"
        ));
        for value in &e.values {
            out.push_str(&format!("    {{ \"{}\", {} }},\n", value.name, value.value));
        }
        out.push_str("};\n");
        (format!("cf_{name}_values"), e.values.len())
    };

    out.push_str(&format!(
        "static const cf_type_t cf_type_{name} = {{ .name = \"{name}\", .kind = CF_KIND_ENUM, .size = sizeof({name}), .align = _Alignof({name}), .enum_array = {array}, .enum_count = {count}, .enum_is_bitflag = false }};\n\n",
    ));
}
