//! Command IR construction.
//!
//! [`CommandBuilder`] selects the struct fields named by a
//! [`GeneratorConfig`], resolves their types against the package's imports
//! and resolves constructor parameters into fields.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use cmdgen_schema::{
    AliasTable, CommandIr, FieldSet, ImportSet, Package, ResolvedConstructor, ResolvedField,
    TypeResolver,
};

/// Builds a [`CommandIr`] from a package and a configuration.
pub struct CommandBuilder<'a> {
    package: &'a Package,
    config: &'a GeneratorConfig,
}

impl<'a> CommandBuilder<'a> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(package: &'a Package, config: &'a GeneratorConfig) -> Self {
        Self { package, config }
    }

    /// Builds the command IR.
    ///
    /// # Errors
    /// Returns `CodegenError` if the struct is missing or not a struct, if two
    /// selected fields share a name ignoring case, or if a constructor names a
    /// field that is not part of the command.
    pub fn build(&self) -> Result<CommandIr, CodegenError> {
        if self.config.command_name.is_empty() {
            return Err(CodegenError::generation("command name is empty"));
        }

        let def = self.package.struct_def(&self.config.struct_name)?;
        let aliases = AliasTable::from_imports(&self.package.imports);
        let resolver = TypeResolver::new(self.package.path.as_str(), &aliases);

        let mut imports = ImportSet::new();
        let mut fields = FieldSet::with_capacity(def.fields.len()).reject_duplicates();

        for field in &def.fields {
            if !self.config.selects(field) {
                tracing::debug!("Skipping field {}.{}", def.name, field.name);
                continue;
            }

            let ty = resolver.resolve(&field.ty, &mut imports);
            let resolved = ResolvedField::new(&field.name, ty);
            if fields.has(&resolved) {
                return Err(CodegenError::FieldConflict {
                    name: field.name.clone(),
                });
            }

            tracing::debug!("Field {} resolved to {}", field.name, resolved.ty);
            fields.append(resolved)?;
        }

        for name in self.config.include.iter() {
            if def.get_field(name).is_none() {
                tracing::warn!("Included field {} does not exist on {}", name, def.name);
            }
        }

        if fields.is_empty() {
            tracing::warn!("No fields selected from {}", def.name);
        }

        if self.config.sorted {
            fields.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let constructors = self.build_constructors(&fields)?;

        Ok(CommandIr {
            package: self.package.name.clone(),
            command_name: self.config.command_name.clone(),
            mutable: self.config.mutable,
            imports: imports.into_vec(),
            fields: fields.into_vec(),
            constructors,
        })
    }

    /// Resolves constructor parameters into command fields.
    fn build_constructors(
        &self,
        fields: &FieldSet,
    ) -> Result<Vec<ResolvedConstructor>, CodegenError> {
        let mut constructors = Vec::with_capacity(self.config.constructors.len());

        for spec in &self.config.constructors {
            let mut params = Vec::with_capacity(spec.params.len());
            for param in &spec.params {
                let field = fields
                    .get_by_key(&ResolvedField::probe(param.as_str()))
                    .map_err(|_| CodegenError::UnknownConstructorField {
                        constructor: spec.name.clone(),
                        field: param.clone(),
                    })?;
                params.push(field.clone());
            }

            constructors.push(ResolvedConstructor {
                name: spec.name.clone(),
                fields: params,
            });
        }

        Ok(constructors)
    }
}
