//! End-to-end tests for the generator pipeline.

use cflect::generator::{Cli, Generator};
use cflect::parser::ast::{DeclKind, Declaration};
use std::fs;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cli(input: &str, output: &str, module: &str, skip_discovery: bool) -> Cli {
    Cli {
        input_path: input.to_string(),
        output_path: output.to_string(),
        module: module.to_string(),
        skip_discovery,
        verbose: false,
    }
}

#[test]
fn test_full_run_over_a_header_tree() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("modules")).unwrap();

    fs::write(
        src.join("player.h"),
        r#"
        #include "cflex_macros.h"

        CF_STRUCT()
        typedef struct
        {
            CF_FIELD() float x;
            CF_FIELD() float y;
        } vec2_t;

        CF_STRUCT()
        typedef struct
        {
            CF_FIELD() int32_t power;
            CF_FIELD() vec2_t  position;
            bool not_reflected;
        } player_t;
        "#,
    )
    .unwrap();
    fs::write(
        src.join("modules/color.h"),
        r#"
        CF_ENUM()
        typedef enum
        {
            COLOR_RED,
            COLOR_GREEN = 10,
            COLOR_BLUE,
        } color_t;
        "#,
    )
    .unwrap();

    let out = dir.path().join("generated");
    let mut generator = Generator::new(cli(
        src.to_str().unwrap(),
        out.to_str().unwrap(),
        "example",
        false,
    ));
    generator.run().unwrap();

    // Discovery order is sorted, so color.h parses before player.h.
    let names: Vec<&str> = generator.model().types.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["color_t", "vec2_t", "player_t"]);

    let header = fs::read_to_string(out.with_extension("h")).unwrap();
    assert!(header.contains("CF_TYPE_ID_PLAYER_T,"));
    assert!(header.contains("void example_register_types( void );"));

    let source = fs::read_to_string(out.with_extension("c")).unwrap();
    assert!(source.contains("#include \"player.h\""));
    assert!(source.contains("#include \"color.h\""));
    assert!(source.contains("{ \"position\", &cf_type_vec2_t, offsetof(player_t, position), 0 },"));
    assert!(source.contains("{ \"COLOR_BLUE\", 11 },"));
    assert!(!source.contains("not_reflected"));
}

#[test]
fn test_skip_discovery_emits_primitives_only() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("primitives");

    let mut generator = Generator::new(cli("unused", out.to_str().unwrap(), "cflex", true));
    generator.run().unwrap();

    assert!(generator.model().is_empty());
    let source = fs::read_to_string(out.with_extension("c")).unwrap();
    assert!(source.contains("cf_type_u64"));
    assert!(!source.contains("Generated Struct"));
}

#[test]
fn test_missing_input_root_fails() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated");

    let missing = dir.path().join("no_such_dir");
    let mut generator = Generator::new(cli(
        missing.to_str().unwrap(),
        out.to_str().unwrap(),
        "cflex",
        false,
    ));
    assert!(generator.run().is_err());
}

#[test]
fn test_parse_error_names_the_failing_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("broken.h"),
        "CF_STRUCT() typedef struct { CF_FIELD() int32_t a;",
    )
    .unwrap();

    let out = dir.path().join("generated");
    let mut generator = Generator::new(cli(
        dir.path().to_str().unwrap(),
        out.to_str().unwrap(),
        "cflex",
        false,
    ));
    let err = generator.run().unwrap_err();
    assert!(err.to_string().contains("broken.h"));
    assert!(err.to_string().contains("closing brace"));
}

#[test]
fn test_declarations_accumulate_across_units() {
    init_logging();
    let mut generator = Generator::new(cli("unused", "unused", "cflex", true));

    generator
        .run_virtual_unit(
            "a.h",
            "CF_ENUM() typedef enum { TEST_ENUM_A, TEST_ENUM_B, TEST_ENUM_C } test_enum_t;",
        )
        .unwrap();
    generator
        .run_virtual_unit(
            "b.h",
            "CF_STRUCT() typedef struct { CF_FIELD() int32_t a; CF_FIELD() test_vec2_t v; } test_struct_t;",
        )
        .unwrap();
    // A unit without any markers leaves the model unchanged.
    generator
        .run_virtual_unit("c.h", "static int nothing_reflected_here;")
        .unwrap();

    let model = generator.model();
    assert_eq!(model.len(), 2);

    let Declaration::Enum(e) = model.find("test_enum_t").unwrap() else {
        panic!("expected enum");
    };
    assert_eq!(e.value_by_name("TEST_ENUM_C").unwrap().value, 2);
    assert_eq!(e.value_by_value(1).unwrap().name, "TEST_ENUM_B");

    let decl = model.find("test_struct_t").unwrap();
    assert_eq!(decl.kind(), DeclKind::Struct);
    let Declaration::Struct(s) = decl else {
        panic!("expected struct");
    };
    assert_eq!(s.field("v").unwrap().type_name, "test_vec2_t");
}
