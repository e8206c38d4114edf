//! # cmdgen Schema
//!
//! Host package model, parser and type resolution.
//!
//! This crate provides:
//! - XML parsing of host package descriptions
//! - Type definitions for declarations and field type trees
//! - Package validation
//! - Import alias table and type resolver
//! - Intermediate representation for code generation

pub mod error;
pub mod imports;
pub mod ir;
pub mod parser;
pub mod resolve;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use imports::{AliasTable, Import, ImportSet, default_alias};
pub use ir::{CommandIr, FieldSet, ResolvedConstructor, ResolvedField};
pub use parser::{parse_package, parse_package_file};
pub use resolve::{ResolvedType, TypeResolver, rewrite_qualifiers};
pub use types::{
    FieldDef, ImportDecl, ImportKind, NamedType, OtherDef, Package, SignatureType, StructDef,
    TypeDecl, TypeExpr, is_exported,
};
pub use validation::validate_package;
