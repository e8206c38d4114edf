//! Getter, setter and presence method generation.

use cmdgen_schema::ir::{CommandIr, ResolvedField};

/// Generator for per-field accessor methods.
pub struct AccessorGenerator<'a> {
    ir: &'a CommandIr,
}

impl<'a> AccessorGenerator<'a> {
    /// Creates a new accessor generator.
    #[must_use]
    pub fn new(ir: &'a CommandIr) -> Self {
        Self { ir }
    }

    /// Generates getter, setter and haser for every field.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for field in &self.ir.fields {
            for method in [
                self.generate_getter(field),
                self.generate_setter(field),
                self.generate_haser(field),
            ] {
                output.push('\n');
                output.push_str(&method);
                output.push('\n');
            }
        }

        output
    }

    /// Generates the value getter.
    fn generate_getter(&self, field: &ResolvedField) -> String {
        format!(
            "func (cmd {receiver}) {name}() {ty} {{\n\treturn cmd.{value}\n}}",
            receiver = self.ir.receiver_type(),
            name = field.title(),
            ty = field.type_spelling(),
            value = field.value_member(),
        )
    }

    /// Generates the setter; it marks the field present.
    fn generate_setter(&self, field: &ResolvedField) -> String {
        let receiver = self.ir.receiver_type();
        let mut output = String::new();

        output.push_str(&format!(
            "func (cmd {receiver}) Set{}(v {}) {receiver} {{\n",
            field.title(),
            field.type_spelling()
        ));
        output.push_str(&format!("\tcmd.{} = true\n", field.presence_member()));
        output.push_str(&format!("\tcmd.{} = v\n\n", field.value_member()));
        output.push_str("\treturn cmd\n");
        output.push('}');

        output
    }

    /// Generates the presence check.
    fn generate_haser(&self, field: &ResolvedField) -> String {
        format!(
            "func (cmd {}) Has{}() bool {{\n\treturn cmd.{}\n}}",
            self.ir.receiver_type(),
            field.title(),
            field.presence_member()
        )
    }
}
