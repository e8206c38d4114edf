//! Import alias table and import descriptors.
//!
//! The [`AliasTable`] records how each module is referenced by the current
//! compilation unit. [`Import`] descriptors are what the resolver collects
//! for the generated file's import block.

use crate::types::{ImportDecl, ImportKind};
use cmdgen_core::{KeyedVec, UniqueKey};
use std::collections::HashMap;

/// Module reference required by generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Alias under which the module is referenced.
    pub alias: Option<String>,
    /// Module path.
    pub path: String,
}

impl Import {
    /// Creates an unaliased import.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    /// Creates an aliased import.
    #[must_use]
    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    /// Returns the identifier that qualifies names from this module.
    #[must_use]
    pub fn qualifier(&self) -> String {
        self.alias
            .clone()
            .unwrap_or_else(|| default_alias(&self.path))
    }

    /// Returns true if the import line has to spell the alias out.
    ///
    /// Only an alias equal to the last path segment is left implicit; any
    /// other alias, including a derived default, is written explicitly.
    #[must_use]
    pub fn needs_alias(&self) -> bool {
        self.alias
            .as_deref()
            .is_some_and(|alias| alias != last_segment(&self.path))
    }
}

impl UniqueKey for Import {
    type Key = String;

    fn unique_key(&self) -> String {
        self.path.clone()
    }
}

/// Imports collected during one generation run, keyed by module path.
pub type ImportSet = KeyedVec<Import>;

/// Explicit aliases of the current compilation unit's imports.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, Option<String>>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from import declarations.
    ///
    /// Wildcard and discard imports are not indexed. When a module is
    /// imported more than once the first explicit alias is kept.
    #[must_use]
    pub fn from_imports(imports: &[ImportDecl]) -> Self {
        let mut table = Self::new();
        for import in imports {
            table.insert(import);
        }
        table
    }

    /// Records one import declaration.
    pub fn insert(&mut self, import: &ImportDecl) {
        if !import.kind.is_referencable() {
            tracing::debug!("Skipping {:?} import of {}", import.kind, import.path);
            return;
        }

        let entry = self.entries.entry(import.path.clone()).or_insert(None);
        if entry.is_none() && import.kind == ImportKind::Aliased {
            *entry = import.alias.clone();
        }
    }

    /// Returns the explicit alias recorded for `path`.
    #[must_use]
    pub fn alias_for(&self, path: &str) -> Option<&str> {
        self.entries.get(path).and_then(|alias| alias.as_deref())
    }

    /// Returns the identifier qualifying names from `path`.
    #[must_use]
    pub fn qualifier_for(&self, path: &str) -> String {
        self.alias_for(path)
            .map_or_else(|| default_alias(path), str::to_string)
    }

    /// Returns the number of indexed modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no module is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the identifier a module is referenced by when imported without
/// an alias.
///
/// The last path segment is used. A major version segment (`v2`) defers to
/// the segment before it, anything after the first `.` is dropped
/// (`yaml.v3`), a `go-` prefix is dropped and `-` becomes `_`.
#[must_use]
pub fn default_alias(path: &str) -> String {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }

    let base = match last.split_once('.') {
        Some((head, _)) if !head.is_empty() => head,
        _ => last,
    };
    let base = match base.strip_prefix("go-") {
        Some(rest) if !rest.is_empty() => rest,
        _ => base,
    };

    base.replace('-', "_")
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(path: &str, alias: Option<&str>) -> ImportDecl {
        ImportDecl::new(path.to_string(), alias.map(str::to_string))
    }

    #[test]
    fn test_default_alias() {
        assert_eq!(default_alias("time"), "time");
        assert_eq!(default_alias("net/http"), "http");
        assert_eq!(default_alias("pkg.in/yaml.v3"), "yaml");
        assert_eq!(default_alias("github.com/jackc/pgx/v5"), "pgx");
        assert_eq!(default_alias("github.com/mattn/go-sqlite3"), "sqlite3");
        assert_eq!(default_alias("github.com/acme/some-lib"), "some_lib");
        assert_eq!(default_alias("v2"), "v2");
    }

    #[test]
    fn test_alias_table_indexes_explicit_aliases() {
        let table = AliasTable::from_imports(&[
            decl("time", None),
            decl("github.com/acme/utils", Some("myAlias")),
            decl("embed", Some("_")),
            decl("github.com/acme/dsl", Some(".")),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.alias_for("time"), None);
        assert_eq!(table.alias_for("github.com/acme/utils"), Some("myAlias"));
        assert_eq!(table.alias_for("embed"), None);
        assert_eq!(table.alias_for("github.com/acme/dsl"), None);
    }

    #[test]
    fn test_alias_table_first_alias_wins() {
        let table = AliasTable::from_imports(&[
            decl("github.com/acme/utils", None),
            decl("github.com/acme/utils", Some("first")),
            decl("github.com/acme/utils", Some("second")),
        ]);

        assert_eq!(table.alias_for("github.com/acme/utils"), Some("first"));
    }

    #[test]
    fn test_qualifier_for() {
        let table = AliasTable::from_imports(&[decl("pkg.in/yaml.v3", Some("y"))]);
        assert_eq!(table.qualifier_for("pkg.in/yaml.v3"), "y");
        assert_eq!(table.qualifier_for("encoding/json"), "json");
        assert!(AliasTable::new().is_empty());
    }

    #[test]
    fn test_import_qualifier_and_alias_rendering() {
        let plain = Import::new("pkg.in/yaml.v3");
        assert_eq!(plain.qualifier(), "yaml");
        assert!(!plain.needs_alias());

        let redundant = Import::aliased("http", "net/http");
        assert!(!redundant.needs_alias());

        let derived = Import::aliased("yaml", "pkg.in/yaml.v3");
        assert!(derived.needs_alias());
        assert!(Import::aliased("some_lib", "github.com/acme/some-lib").needs_alias());
        assert!(Import::aliased("pgx", "github.com/jackc/pgx/v5").needs_alias());

        let custom = Import::aliased("myAlias", "github.com/acme/utils");
        assert_eq!(custom.qualifier(), "myAlias");
        assert!(custom.needs_alias());
    }

    #[test]
    fn test_import_set_keys_by_path() {
        let mut set = ImportSet::new();
        set.append(Import::aliased("yaml", "pkg.in/yaml.v3")).unwrap();
        set.append(Import::new("pkg.in/yaml.v3")).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.items()[0].alias.as_deref(), Some("yaml"));
    }
}
