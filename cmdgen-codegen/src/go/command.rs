//! Package clause, import block and command struct generation.

use cmdgen_schema::ir::CommandIr;

/// Generator for the file header and the command struct.
pub struct CommandGenerator<'a> {
    ir: &'a CommandIr,
}

impl<'a> CommandGenerator<'a> {
    /// Creates a new command generator.
    #[must_use]
    pub fn new(ir: &'a CommandIr) -> Self {
        Self { ir }
    }

    /// Generates the package clause, imports and command struct.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("package {}\n", self.ir.package));
        output.push_str(&self.generate_imports());
        output.push('\n');
        output.push_str(&self.generate_struct());

        output
    }

    /// Generates the import block; empty when nothing is imported.
    fn generate_imports(&self) -> String {
        let mut output = String::new();

        if !self.ir.has_imports() {
            return output;
        }

        output.push_str("\nimport (");
        for import in &self.ir.imports {
            output.push_str("\n\t");
            if import.needs_alias() {
                if let Some(alias) = &import.alias {
                    output.push_str(&format!("{alias} "));
                }
            }
            output.push_str(&format!("\"{}\"", import.path));
        }
        output.push_str("\n)\n");

        output
    }

    /// Generates the command struct with value and presence members.
    fn generate_struct(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("type {} struct {{", self.ir.command_name));
        for field in &self.ir.fields {
            output.push_str(&format!(
                "\n\t{}   {}\n\t{} bool\n",
                field.value_member(),
                field.type_spelling(),
                field.presence_member()
            ));
        }
        output.push_str("}\n");

        output
    }
}
