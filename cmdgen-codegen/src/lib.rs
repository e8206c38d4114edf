//! # cmdgen Codegen
//!
//! Go command type generation from host package descriptions.
//!
//! This crate provides:
//! - Generator configuration (field selection, constructors, receivers)
//! - Command IR construction with type resolution
//! - Go source generation for the command struct, constructors and accessors
//! - Output file naming and writing

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod go;

pub use builder::CommandBuilder;
pub use config::{ConstructorSpec, GeneratorConfig};
pub use error::CodegenError;
pub use generator::Generator;

use std::path::Path;

/// Generates Go source for a command from a package description string.
///
/// # Arguments
/// * `xml` - XML package description
/// * `config` - Generation settings
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_xml(xml: &str, config: &GeneratorConfig) -> Result<String, CodegenError> {
    let package = cmdgen_schema::parse_package(xml)?;
    cmdgen_schema::validate_package(&package)?;
    let ir = CommandBuilder::new(&package, config).build()?;
    let generator = Generator::new(&ir);
    Ok(generator.generate())
}

/// Generates Go source for a command from a package description file.
///
/// # Arguments
/// * `path` - Path to the XML package description
/// * `config` - Generation settings
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &Path, config: &GeneratorConfig) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

/// Writes generated code to `path`, replacing any existing file.
///
/// # Errors
/// Returns `CodegenError::Io` if the file cannot be written.
pub fn write_output(path: &Path, code: &str) -> Result<(), CodegenError> {
    std::fs::write(path, code)?;
    tracing::info!("Wrote {} bytes to {}", code.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package name="examples" path="github.com/acme/examples">
    <imports>
        <import path="pkg.in/yaml.v3" alias="yaml"/>
    </imports>
    <struct name="Struct">
        <field name="Decoder">
            <pointer><pointer><named module="pkg.in/yaml.v3" name="Decoder"/></pointer></pointer>
        </field>
    </struct>
</package>"#;

    #[test]
    fn test_generate_from_xml() {
        let config = GeneratorConfig::new("Struct", "DecodeCmd");
        let code = generate_from_xml(PACKAGE, &config).expect("Failed to generate");

        assert!(code.starts_with("package examples\n\nimport (\n\tyaml \"pkg.in/yaml.v3\"\n)\n"));
        assert!(code.contains("\tvDecoder   **yaml.Decoder\n"));
        assert!(code.contains("func (cmd DecodeCmd) Decoder() **yaml.Decoder {"));
    }

    #[test]
    fn test_generate_names_derived_alias() {
        let xml = r#"<package name="p" path="github.com/acme/p">
    <imports><import path="github.com/acme/some-lib"/></imports>
    <struct name="S">
        <field name="A"><named module="github.com/acme/some-lib" name="T"/></field>
    </struct>
</package>"#;
        let code = generate_from_xml(xml, &GeneratorConfig::new("S", "Cmd")).unwrap();

        assert!(code.contains("import (\n\tsome_lib \"github.com/acme/some-lib\"\n)\n"));
        assert!(code.contains("\tvA   some_lib.T\n"));
    }

    #[test]
    fn test_generate_from_xml_invalid_package() {
        let config = GeneratorConfig::new("Struct", "DecodeCmd");
        let err = generate_from_xml(r#"<package name=""/>"#, &config).unwrap_err();
        assert!(matches!(err, CodegenError::Schema(_)));

        let err = generate_from_xml(r#"<package name="p"></struct>"#, &config).unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_generate_from_file_and_write() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("package.xml");
        std::fs::write(&input, PACKAGE).expect("Failed to write input");

        let config = GeneratorConfig::new("Struct", "DecodeCmd");
        let code = generate_from_file(&input, &config).expect("Failed to generate");

        let output = dir.path().join(config.output_file_name());
        write_output(&output, &code).expect("Failed to write output");

        assert_eq!(output.file_name().unwrap(), "decode_cmd.go");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), code);
    }

    #[test]
    fn test_generate_from_missing_file() {
        let config = GeneratorConfig::new("Struct", "DecodeCmd");
        let err = generate_from_file(Path::new("/nonexistent/package.xml"), &config).unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }
}
