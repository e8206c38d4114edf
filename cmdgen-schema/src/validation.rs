//! Package validation utilities.
//!
//! This module provides validation functions for parsed host packages to
//! ensure the type trees can be resolved into source spellings.

use crate::error::SchemaError;
use crate::types::{Package, StructDef, TypeDecl, TypeExpr};
use std::collections::HashSet;

/// Validates a parsed package for correctness.
///
/// # Arguments
/// * `package` - The package to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_package(package: &Package) -> Result<(), SchemaError> {
    if package.name.is_empty() {
        return Err(SchemaError::validation("package name is empty"));
    }

    validate_imports(package)?;
    validate_decls(package)?;
    Ok(())
}

/// Validates the import declarations.
fn validate_imports(package: &Package) -> Result<(), SchemaError> {
    for import in &package.imports {
        if import.path.is_empty() {
            return Err(SchemaError::validation("import with empty path"));
        }
        if import.alias.as_deref() == Some("") {
            return Err(SchemaError::validation(format!(
                "import '{}' has an empty alias",
                import.path
            )));
        }
    }
    Ok(())
}

/// Validates all type declarations in the package.
fn validate_decls(package: &Package) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for decl in &package.decls {
        if decl.name().is_empty() {
            return Err(SchemaError::validation("type declaration with empty name"));
        }
        if !seen.insert(decl.name()) {
            return Err(SchemaError::validation(format!(
                "Duplicate type name '{}'",
                decl.name()
            )));
        }
        if let TypeDecl::Struct(def) = decl {
            validate_struct(def)?;
        }
    }

    Ok(())
}

/// Validates a struct declaration.
fn validate_struct(def: &StructDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for field in &def.fields {
        if field.name.is_empty() {
            return Err(SchemaError::validation(format!(
                "field with empty name in struct '{}'",
                def.name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::validation(format!(
                "Duplicate field name '{}' in struct '{}'",
                field.name, def.name
            )));
        }
        validate_type(&field.name, &field.ty)?;
    }

    Ok(())
}

/// Validates a field type tree.
fn validate_type(field: &str, ty: &TypeExpr) -> Result<(), SchemaError> {
    match ty {
        TypeExpr::Pointer(inner) | TypeExpr::Sequence(inner) => validate_type(field, inner),
        TypeExpr::FixedArray { element, .. } => validate_type(field, element),
        TypeExpr::Map { key, value } => {
            validate_type(field, key)?;
            validate_type(field, value)
        }
        TypeExpr::Named(named) => {
            if named.name.is_empty() {
                return Err(SchemaError::malformed(field, "named type without a name"));
            }
            for arg in &named.type_args {
                validate_type(field, arg)?;
            }
            Ok(())
        }
        TypeExpr::Record(spelling) => {
            if spelling.is_empty() {
                return Err(SchemaError::malformed(field, "empty record spelling"));
            }
            Ok(())
        }
        TypeExpr::Primitive(spelling) => {
            if spelling.is_empty() {
                return Err(SchemaError::malformed(field, "empty primitive spelling"));
            }
            Ok(())
        }
        TypeExpr::Signature(signature) => {
            if signature.variadic
                && !matches!(signature.params.last(), Some(TypeExpr::Sequence(_)))
            {
                return Err(SchemaError::malformed(
                    field,
                    "variadic function must end with a slice parameter",
                ));
            }
            for param in signature.params.iter().chain(&signature.results) {
                validate_type(field, param)?;
            }
            Ok(())
        }
    }
}
