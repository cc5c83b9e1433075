//! A reflection metadata generator for annotated C headers.
//!
//! `cflect` scans C source text for `CF_STRUCT()`, `CF_ENUM()` and
//! `CF_FIELD()` annotation markers, parses the annotated struct and enum
//! declarations into an in-memory type model, and emits the C reflection
//! tables consumed by the cflex runtime.

/// Contains the target-format emitter.
pub mod codegen;
/// Contains the error types for the application.
pub mod error;
/// Contains the generator pipeline and CLI definition.
pub mod generator;
pub mod parser;
/// Contains header discovery.
pub mod scan;
