//! Command source generation.

use crate::go::{AccessorGenerator, CommandGenerator, ConstructorGenerator};
use cmdgen_schema::ir::CommandIr;

/// Renders a [`CommandIr`] into Go source.
pub struct Generator<'a> {
    ir: &'a CommandIr,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(ir: &'a CommandIr) -> Self {
        Self { ir }
    }

    /// Generates the complete source file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&CommandGenerator::new(self.ir).generate());
        output.push_str(&ConstructorGenerator::new(self.ir).generate());
        output.push_str(&AccessorGenerator::new(self.ir).generate());

        tracing::debug!(
            "Generated {} ({} fields, {} constructors, {} bytes)",
            self.ir.command_name,
            self.ir.fields.len(),
            self.ir.constructors.len(),
            output.len()
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_schema::{Import, ResolvedConstructor, ResolvedField, ResolvedType};

    #[test]
    fn test_generate_full_file() {
        let field = ResolvedField::new("Created", ResolvedType::new(1, "time.Time"));
        let ir = CommandIr {
            package: "examples".to_string(),
            command_name: "CreateCmd".to_string(),
            mutable: true,
            imports: vec![Import::aliased("time", "time")],
            fields: vec![field.clone()],
            constructors: vec![ResolvedConstructor {
                name: "default".to_string(),
                fields: vec![field],
            }],
        };

        let expected = r#"package examples

import (
	"time"
)

type CreateCmd struct {
	vCreated   *time.Time
	hasCreated bool
}

func NewCreateCmd(
	vCreated *time.Time,
) *CreateCmd {
	return &CreateCmd{
		vCreated: vCreated,
		hasCreated: true,
	}
}

func (cmd *CreateCmd) Created() *time.Time {
	return cmd.vCreated
}

func (cmd *CreateCmd) SetCreated(v *time.Time) *CreateCmd {
	cmd.hasCreated = true
	cmd.vCreated = v

	return cmd
}

func (cmd *CreateCmd) HasCreated() bool {
	return cmd.hasCreated
}
"#;
        assert_eq!(Generator::new(&ir).generate(), expected);
    }
}
