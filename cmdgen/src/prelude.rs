//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use cmdgen::prelude::*;
//! ```

// Collections
pub use cmdgen_core::{CollectionError, KeyedVec, UniqueKey, UniqueVec};

// Package model and resolution
pub use cmdgen_schema::{
    AliasTable, CommandIr, Import, ImportSet, Package, ParseError, ResolvedField, ResolvedType,
    SchemaError, TypeExpr, TypeResolver, parse_package, parse_package_file, validate_package,
};

// Generation
pub use cmdgen_codegen::{
    CodegenError, CommandBuilder, ConstructorSpec, Generator, GeneratorConfig, generate_from_file,
    generate_from_xml, write_output,
};
