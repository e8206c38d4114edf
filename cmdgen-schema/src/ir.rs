//! Intermediate representation for code generation.
//!
//! This module provides the resolved, render-ready description of one
//! command: its fields with final type spellings, its constructors and the
//! imports the generated file needs.

use crate::imports::Import;
use crate::resolve::ResolvedType;
use cmdgen_core::{KeyedVec, UniqueKey};

/// Intermediate representation of a command for code generation.
#[derive(Debug, Clone)]
pub struct CommandIr {
    /// Package name of the generated file.
    pub package: String,
    /// Command type name.
    pub command_name: String,
    /// Whether methods use pointer receivers.
    pub mutable: bool,
    /// Imports required by the field types.
    pub imports: Vec<Import>,
    /// Command fields, in output order.
    pub fields: Vec<ResolvedField>,
    /// Constructors, in declaration order.
    pub constructors: Vec<ResolvedConstructor>,
}

impl CommandIr {
    /// Returns the receiver and return type of generated methods.
    #[must_use]
    pub fn receiver_type(&self) -> String {
        if self.mutable {
            format!("*{}", self.command_name)
        } else {
            self.command_name.clone()
        }
    }

    /// Returns true if the generated file needs an import block.
    #[must_use]
    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }

    /// Gets a field by name, ignoring case.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&ResolvedField> {
        let key = name.to_lowercase();
        self.fields.iter().find(|f| f.unique_key() == key)
    }
}

/// Resolved field information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field name as declared on the source struct.
    pub name: String,
    /// Resolved field type.
    pub ty: ResolvedType,
}

impl ResolvedField {
    /// Creates a resolved field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Creates a lookup probe carrying only the field name.
    #[must_use]
    pub fn probe(name: impl Into<String>) -> Self {
        Self::new(name, ResolvedType::default())
    }

    /// Returns the title-cased field name.
    #[must_use]
    pub fn title(&self) -> String {
        to_title_case(&self.name)
    }

    /// Returns the name of the value member.
    #[must_use]
    pub fn value_member(&self) -> String {
        format!("v{}", self.title())
    }

    /// Returns the name of the presence flag member.
    #[must_use]
    pub fn presence_member(&self) -> String {
        format!("has{}", self.title())
    }

    /// Returns the full type spelling, pointer markers included.
    #[must_use]
    pub fn type_spelling(&self) -> String {
        self.ty.to_string()
    }
}

impl UniqueKey for ResolvedField {
    type Key = String;

    fn unique_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Fields of a command, keyed by lower-cased name.
pub type FieldSet = KeyedVec<ResolvedField>;

/// Resolved constructor information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConstructor {
    /// Constructor name; `default` selects the plain constructor.
    pub name: String,
    /// Parameters, in declaration order.
    pub fields: Vec<ResolvedField>,
}

impl ResolvedConstructor {
    /// Returns true if this is the plain `New<Command>` constructor.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.eq_ignore_ascii_case("default")
    }

    /// Returns the generated function name.
    #[must_use]
    pub fn function_name(&self, command_name: &str) -> String {
        if self.is_default() {
            format!("New{}", to_title_case(command_name))
        } else {
            format!("New{}", to_title_case(&format!("{command_name}{}", self.name)))
        }
    }
}

/// Converts the first character to upper case.
#[must_use]
pub fn to_title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Acronyms kept together when converting to snake_case.
const ACRONYMS: [&str; 3] = ["ID", "JSON", "URL"];

/// Converts a string to snake_case.
///
/// Every upper-case letter starts a new word, except that `ID`, `JSON` and
/// `URL` are treated as single words.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if let Some(acronym) = ACRONYMS.iter().find(|a| rest.starts_with(**a)) {
            result.push('_');
            result.push_str(acronym);
            rest = &rest[acronym.len()..];
            continue;
        }
        if c.is_uppercase() {
            result.push('_');
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }

    result.trim_matches('_').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, depth: usize, spelling: &str) -> ResolvedField {
        ResolvedField::new(name, ResolvedType::new(depth, spelling))
    }

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("string"), "String");
        assert_eq!(to_title_case("String"), "String");
        assert_eq!(to_title_case("ünicode"), "Ünicode");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("CreateStructCmd"), "create_struct_cmd");
        assert_eq!(to_snake_case("UserIDCmd"), "user_id_cmd");
        assert_eq!(to_snake_case("ParseJSONURL"), "parse_json_url");
        assert_eq!(to_snake_case("command"), "command");
        assert_eq!(to_snake_case("HTTPCmd"), "h_t_t_p_cmd");
        assert_eq!(to_snake_case("Cmd_"), "cmd");
    }

    #[test]
    fn test_field_members() {
        let f = field("string", 1, "time.Time");
        assert_eq!(f.title(), "String");
        assert_eq!(f.value_member(), "vString");
        assert_eq!(f.presence_member(), "hasString");
        assert_eq!(f.type_spelling(), "*time.Time");
    }

    #[test]
    fn test_field_key_ignores_case() {
        let mut fields = FieldSet::new().reject_duplicates();
        fields.append(field("String", 0, "string")).unwrap();

        let err = fields.append(field("string", 0, "int")).unwrap_err();
        assert!(err.is_duplicate());

        let found = fields.get_by_key(&ResolvedField::probe("STRING")).unwrap();
        assert_eq!(found.name, "String");
    }

    #[test]
    fn test_constructor_function_name() {
        let default = ResolvedConstructor {
            name: "Default".to_string(),
            fields: Vec::new(),
        };
        assert!(default.is_default());
        assert_eq!(default.function_name("CreateCmd"), "NewCreateCmd");

        let named = ResolvedConstructor {
            name: "WithFoo".to_string(),
            fields: Vec::new(),
        };
        assert_eq!(named.function_name("CreateCmd"), "NewCreateCmdWithFoo");
        assert_eq!(named.function_name("createCmd"), "NewCreateCmdWithFoo");
    }

    #[test]
    fn test_command_ir_helpers() {
        let ir = CommandIr {
            package: "examples".to_string(),
            command_name: "CreateCmd".to_string(),
            mutable: true,
            imports: Vec::new(),
            fields: vec![field("Name", 0, "string")],
            constructors: Vec::new(),
        };

        assert_eq!(ir.receiver_type(), "*CreateCmd");
        assert!(!ir.has_imports());
        assert!(ir.get_field("name").is_some());
        assert!(ir.get_field("missing").is_none());
    }
}
