//! Host package definitions.
//!
//! This module contains the data structures describing one compilation unit
//! of the host codebase: its import declarations, its type declarations and
//! the type expression tree of every struct field.

use crate::error::SchemaError;
use std::collections::HashMap;

/// One compilation unit of the host codebase.
#[derive(Debug, Clone)]
pub struct Package {
    /// Package name used in the generated package clause.
    pub name: String,
    /// Module path of this package.
    pub path: String,
    /// Import declarations, in source order.
    pub imports: Vec<ImportDecl>,
    /// Type declarations, in source order.
    pub decls: Vec<TypeDecl>,
    /// Declaration lookup map (built while adding).
    decl_map: HashMap<String, usize>,
}

impl Package {
    /// Creates a new empty package.
    #[must_use]
    pub fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            imports: Vec::new(),
            decls: Vec::new(),
            decl_map: HashMap::new(),
        }
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, import: ImportDecl) {
        self.imports.push(import);
    }

    /// Adds a type declaration. The first declaration of a name wins lookups.
    pub fn add_decl(&mut self, decl: TypeDecl) {
        let index = self.decls.len();
        self.decl_map.entry(decl.name().to_string()).or_insert(index);
        self.decls.push(decl);
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn get_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.decl_map.get(name).and_then(|&idx| self.decls.get(idx))
    }

    /// Looks up a struct declaration by name.
    ///
    /// # Errors
    /// Returns `SchemaError::DeclNotFound` if nothing is declared under
    /// `name`, or `SchemaError::NotAStruct` if the declaration is not a struct.
    pub fn struct_def(&self, name: &str) -> Result<&StructDef, SchemaError> {
        match self.get_decl(name) {
            Some(TypeDecl::Struct(def)) => Ok(def),
            Some(TypeDecl::Other(other)) => Err(SchemaError::NotAStruct {
                name: other.name.clone(),
                underlying: other.underlying.clone(),
            }),
            None => Err(SchemaError::DeclNotFound {
                name: name.to_string(),
            }),
        }
    }
}

/// Import declaration of a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported module path.
    pub path: String,
    /// Explicit alias, if any.
    pub alias: Option<String>,
    /// Import kind.
    pub kind: ImportKind,
}

impl ImportDecl {
    /// Creates an import declaration; the kind is derived from the alias.
    #[must_use]
    pub fn new(path: String, alias: Option<String>) -> Self {
        let kind = ImportKind::from_alias(alias.as_deref());
        Self { path, alias, kind }
    }
}

/// Kind of an import declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportKind {
    /// Plain import, referenced by its default name.
    #[default]
    Normal,
    /// Import under an explicit alias.
    Aliased,
    /// Import merged into the current namespace (`.`).
    Wildcard,
    /// Import for side effects only (`_`).
    Discard,
}

impl ImportKind {
    /// Derives the kind from an optional alias.
    #[must_use]
    pub fn from_alias(alias: Option<&str>) -> Self {
        match alias {
            None => Self::Normal,
            Some(".") => Self::Wildcard,
            Some("_") => Self::Discard,
            Some(_) => Self::Aliased,
        }
    }

    /// Returns true if imports of this kind can qualify identifiers.
    #[must_use]
    pub const fn is_referencable(&self) -> bool {
        matches!(self, Self::Normal | Self::Aliased)
    }
}

/// Type declaration variants.
#[derive(Debug, Clone)]
pub enum TypeDecl {
    /// Struct type declaration.
    Struct(StructDef),
    /// Any other declaration (aliases, interfaces, basic types).
    Other(OtherDef),
}

impl TypeDecl {
    /// Returns the name of the declaration.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Other(o) => &o.name,
        }
    }

    /// Returns true if this is a struct declaration.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

/// Struct type declaration.
#[derive(Debug, Clone)]
pub struct StructDef {
    /// Type name.
    pub name: String,
    /// Fields, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    /// Creates a new struct declaration.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Adds a field to the struct.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Non-struct type declaration.
#[derive(Debug, Clone)]
pub struct OtherDef {
    /// Type name.
    pub name: String,
    /// Spelling of the underlying type.
    pub underlying: String,
}

/// Struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeExpr,
    /// Whether the field is visible outside its package.
    pub exported: bool,
}

impl FieldDef {
    /// Creates a field whose visibility follows its name.
    #[must_use]
    pub fn new(name: String, ty: TypeExpr) -> Self {
        let exported = is_exported(&name);
        Self { name, ty, exported }
    }
}

/// Type expression tree of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// One level of indirection.
    Pointer(Box<TypeExpr>),
    /// Nominal type declared in some module.
    Named(NamedType),
    /// Anonymous struct, as fully qualified text.
    Record(String),
    /// Function type.
    Signature(SignatureType),
    /// Dynamically sized sequence.
    Sequence(Box<TypeExpr>),
    /// Fixed-size array.
    FixedArray {
        /// Number of elements.
        length: u64,
        /// Element type.
        element: Box<TypeExpr>,
    },
    /// Keyed collection.
    Map {
        /// Key type.
        key: Box<TypeExpr>,
        /// Value type.
        value: Box<TypeExpr>,
    },
    /// Type spelled verbatim.
    Primitive(String),
}

impl TypeExpr {
    /// Wraps `inner` in one pointer level.
    #[must_use]
    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Creates a named type without type arguments.
    #[must_use]
    pub fn named(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(NamedType::new(module, name))
    }

    /// Creates a sequence of `element`.
    #[must_use]
    pub fn sequence(element: TypeExpr) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Creates a fixed array of `length` elements.
    #[must_use]
    pub fn array(length: u64, element: TypeExpr) -> Self {
        Self::FixedArray {
            length,
            element: Box::new(element),
        }
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a primitive type.
    #[must_use]
    pub fn primitive(spelling: impl Into<String>) -> Self {
        Self::Primitive(spelling.into())
    }

    /// Returns the number of leading pointer levels.
    #[must_use]
    pub fn pointer_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Pointer(inner) = current {
            depth += 1;
            current = inner;
        }
        depth
    }

    /// Returns the innermost non-pointer node.
    #[must_use]
    pub fn pointee(&self) -> &TypeExpr {
        let mut current = self;
        while let Self::Pointer(inner) = current {
            current = inner;
        }
        current
    }
}

/// Nominal type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Declaring module path; empty for predeclared types.
    pub module: String,
    /// Bare type name.
    pub name: String,
    /// Type arguments of a generic instantiation.
    pub type_args: Vec<TypeExpr>,
}

impl NamedType {
    /// Creates a named type without type arguments.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// Adds type arguments.
    #[must_use]
    pub fn with_args(mut self, type_args: Vec<TypeExpr>) -> Self {
        self.type_args = type_args;
        self
    }
}

/// Function type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SignatureType {
    /// Parameter types.
    pub params: Vec<TypeExpr>,
    /// Result types.
    pub results: Vec<TypeExpr>,
    /// Whether the last parameter is variadic.
    pub variadic: bool,
}

/// Returns true if `name` is visible outside its package.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
