//! Generator configuration.

use crate::error::CodegenError;
use cmdgen_core::{KeyedVec, UniqueKey, UniqueVec};
use cmdgen_schema::FieldDef;
use cmdgen_schema::ir::to_snake_case;
use std::str::FromStr;

/// Constructor declaration in `Name:field1,field2` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorSpec {
    /// Constructor name; `default` selects the plain constructor.
    pub name: String,
    /// Names of the fields taken as parameters.
    pub params: Vec<String>,
}

impl ConstructorSpec {
    /// Creates a constructor declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl FromStr for ConstructorSpec {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name.trim(), params),
            None => (s.trim(), ""),
        };

        if name.is_empty() {
            return Err(CodegenError::invalid_constructor(s, "missing constructor name"));
        }

        let params = params
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self::new(name, params))
    }
}

impl UniqueKey for ConstructorSpec {
    type Key = String;

    /// Names differing only in case render the same function.
    fn unique_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Configuration of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Source struct name.
    pub struct_name: String,
    /// Generated command type name.
    pub command_name: String,
    /// Use pointer receivers and return `*Command` from setters.
    pub mutable: bool,
    /// Include fields not visible outside their package.
    pub include_unexported: bool,
    /// Order fields by name instead of declaration order.
    pub sorted: bool,
    /// Field names to skip.
    pub exclude: UniqueVec<String>,
    /// Field names to keep; overrides `exclude` when non-empty.
    pub include: UniqueVec<String>,
    /// Constructors, keyed by lower-cased name.
    pub constructors: KeyedVec<ConstructorSpec>,
}

impl GeneratorConfig {
    /// Creates a configuration generating `command_name` from `struct_name`.
    #[must_use]
    pub fn new(struct_name: impl Into<String>, command_name: impl Into<String>) -> Self {
        Self {
            struct_name: struct_name.into(),
            command_name: command_name.into(),
            mutable: false,
            include_unexported: false,
            sorted: false,
            exclude: UniqueVec::new(),
            include: UniqueVec::new(),
            constructors: KeyedVec::new().reject_duplicates(),
        }
    }

    /// Enables or disables pointer receivers.
    #[must_use]
    pub fn mutable(mut self, enabled: bool) -> Self {
        self.mutable = enabled;
        self
    }

    /// Enables or disables unexported fields.
    #[must_use]
    pub fn include_unexported(mut self, enabled: bool) -> Self {
        self.include_unexported = enabled;
        self
    }

    /// Enables or disables ordering fields by name.
    #[must_use]
    pub fn sorted(mut self, enabled: bool) -> Self {
        self.sorted = enabled;
        self
    }

    /// Adds field names to skip. Repeated names are kept once.
    ///
    /// # Errors
    /// Returns `CodegenError::Collection` if the list rejects a name.
    pub fn exclude<I>(mut self, names: I) -> Result<Self, CodegenError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.exclude.try_extend(names.into_iter().map(Into::into))?;
        Ok(self)
    }

    /// Adds field names to keep. Repeated names are kept once.
    ///
    /// # Errors
    /// Returns `CodegenError::Collection` if the list rejects a name.
    pub fn include<I>(mut self, names: I) -> Result<Self, CodegenError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.include.try_extend(names.into_iter().map(Into::into))?;
        Ok(self)
    }

    /// Adds a constructor.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateConstructor` if a constructor with the
    /// same name, ignoring case, was already added.
    pub fn constructor(mut self, spec: ConstructorSpec) -> Result<Self, CodegenError> {
        let name = spec.name.clone();
        if self.constructors.append(spec).is_err() {
            return Err(CodegenError::DuplicateConstructor { name });
        }
        Ok(self)
    }

    /// Returns true if `field` becomes a command field.
    #[must_use]
    pub fn selects(&self, field: &FieldDef) -> bool {
        let listed = if self.include.is_empty() {
            !self.exclude.has(&field.name)
        } else {
            self.include.has(&field.name)
        };

        listed && (self.include_unexported || field.exported)
    }

    /// Returns the default output file name for the command.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.go", to_snake_case(&self.command_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_schema::TypeExpr;

    fn field(name: &str) -> FieldDef {
        FieldDef::new(name.to_string(), TypeExpr::primitive("string"))
    }

    #[test]
    fn test_constructor_spec_parse() {
        let spec: ConstructorSpec = "WithFoo:foo, bar".parse().unwrap();
        assert_eq!(spec.name, "WithFoo");
        assert_eq!(spec.params, vec!["foo".to_string(), "bar".to_string()]);

        let spec: ConstructorSpec = "default".parse().unwrap();
        assert_eq!(spec.name, "default");
        assert!(spec.params.is_empty());

        let spec: ConstructorSpec = "default:".parse().unwrap();
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_constructor_spec_missing_name() {
        let err = ":foo".parse::<ConstructorSpec>().unwrap_err();
        assert!(matches!(err, CodegenError::InvalidConstructor { .. }));
    }

    #[test]
    fn test_duplicate_constructor_rejected() {
        let config = GeneratorConfig::new("Struct", "Cmd")
            .constructor(ConstructorSpec::new("default", vec!["a".to_string()]))
            .unwrap();

        let err = config
            .constructor(ConstructorSpec::new("default", Vec::new()))
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicated constructor name \"default\"");
    }

    #[test]
    fn test_default_constructor_names_ignore_case() {
        let config = GeneratorConfig::new("S", "Cmd")
            .constructor("default:a".parse().unwrap())
            .unwrap();

        let err = config
            .constructor("Default:b".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateConstructor { ref name } if name == "Default"));
    }

    #[test]
    fn test_named_constructors_ignore_case() {
        let config = GeneratorConfig::new("S", "Cmd")
            .constructor(ConstructorSpec::new("WithName", vec!["name".to_string()]))
            .unwrap()
            .constructor(ConstructorSpec::new("default", Vec::new()))
            .unwrap();
        assert_eq!(config.constructors.len(), 2);

        assert!(
            config
                .constructor(ConstructorSpec::new("withname", Vec::new()))
                .is_err()
        );
    }

    #[test]
    fn test_selects_exclude() {
        let config = GeneratorConfig::new("Struct", "Cmd")
            .exclude(["Skip"])
            .unwrap();
        assert!(config.selects(&field("Keep")));
        assert!(!config.selects(&field("Skip")));
    }

    #[test]
    fn test_selects_include_overrides_exclude() {
        let config = GeneratorConfig::new("Struct", "Cmd")
            .exclude(["Keep"])
            .unwrap()
            .include(["Keep"])
            .unwrap();
        assert!(config.selects(&field("Keep")));
        assert!(!config.selects(&field("Other")));
    }

    #[test]
    fn test_selects_unexported() {
        let config = GeneratorConfig::new("Struct", "Cmd");
        assert!(!config.selects(&field("hidden")));

        let config = config.include_unexported(true);
        assert!(config.selects(&field("hidden")));
    }

    #[test]
    fn test_repeated_exclude_kept_once() {
        let config = GeneratorConfig::new("Struct", "Cmd")
            .exclude(["A", "A"])
            .unwrap()
            .exclude(vec!["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(config.exclude.items(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            GeneratorConfig::new("User", "UserIDCmd").output_file_name(),
            "user_id_cmd.go"
        );
        assert_eq!(
            GeneratorConfig::new("Struct", "CreateStructCmd").output_file_name(),
            "create_struct_cmd.go"
        );
    }
}
