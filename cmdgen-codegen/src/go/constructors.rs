//! Constructor function generation.

use cmdgen_schema::ir::{CommandIr, ResolvedConstructor};

/// Generator for command constructors.
pub struct ConstructorGenerator<'a> {
    ir: &'a CommandIr,
}

impl<'a> ConstructorGenerator<'a> {
    /// Creates a new constructor generator.
    #[must_use]
    pub fn new(ir: &'a CommandIr) -> Self {
        Self { ir }
    }

    /// Generates every constructor, each preceded by a blank line.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for constructor in &self.ir.constructors {
            output.push('\n');
            output.push_str(&self.generate_constructor(constructor));
            output.push('\n');
        }

        output
    }

    /// Generates one constructor.
    fn generate_constructor(&self, constructor: &ResolvedConstructor) -> String {
        let mut output = String::new();
        let command = &self.ir.command_name;
        let reference = if self.ir.mutable { "&" } else { "" };

        output.push_str(&format!(
            "func {}(",
            constructor.function_name(command)
        ));
        if !constructor.fields.is_empty() {
            for field in &constructor.fields {
                output.push_str(&format!(
                    "\n\t{} {},",
                    field.value_member(),
                    field.type_spelling()
                ));
            }
            output.push('\n');
        }
        output.push_str(&format!(") {} {{\n", self.ir.receiver_type()));

        output.push_str(&format!("\treturn {reference}{command}{{"));
        if constructor.fields.is_empty() {
            output.push('}');
        } else {
            for field in &constructor.fields {
                output.push_str(&format!(
                    "\n\t\t{value}: {value},\n\t\t{presence}: true,",
                    value = field.value_member(),
                    presence = field.presence_member()
                ));
            }
            output.push_str("\n\t}");
        }
        output.push_str("\n}");

        output
    }
}
