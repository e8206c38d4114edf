//! # cmdgen
//!
//! Generates Go command types from struct declarations.
//!
//! A command type mirrors selected fields of a source struct. Every field is
//! stored next to a presence flag, set through a setter that marks it
//! present, and read back through a getter and a `Has<Field>` check.
//! Field types are spelled with the aliases the source file imports them
//! under, and the modules they reference are collected into the generated
//! import block.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cmdgen::prelude::*;
//! use std::path::Path;
//!
//! let config = GeneratorConfig::new("Struct", "CreateStructCmd")
//!     .mutable(true)
//!     .constructor("default:name,created".parse()?)?;
//!
//! let code = generate_from_file(Path::new("package.xml"), &config)?;
//! write_output(Path::new(&config.output_file_name()), &code)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Unique ordered collections
//! - [`schema`] - Package descriptions, import aliases and type resolution
//! - [`codegen`] - Command IR and Go source generation

pub mod prelude;

/// Unique ordered collections.
pub mod core {
    pub use cmdgen_core::*;
}

/// Package descriptions, import aliases and type resolution.
pub mod schema {
    pub use cmdgen_schema::*;
}

/// Command IR and Go source generation.
pub mod codegen {
    pub use cmdgen_codegen::*;
}
