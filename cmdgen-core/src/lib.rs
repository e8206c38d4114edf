//! # cmdgen Core
//!
//! Core collection types shared by the cmdgen crates.
//!
//! This crate provides:
//! - An insertion-ordered collection that rejects or ignores duplicate keys
//! - The [`UniqueKey`] capability for items defining their own identity
//! - Error types for collection operations

pub mod error;
pub mod unique;

pub use error::{CollectionError, Result};
pub use unique::{ByKey, ByValue, DuplicateHandler, KeyStrategy, KeyedVec, UniqueKey, UniqueVec};
