//! Type resolution.
//!
//! [`TypeResolver`] turns a [`TypeExpr`] into the spelling used by generated
//! source, rewriting module qualifiers to the aliases in scope and recording
//! every foreign module it references into an [`ImportSet`].

use crate::imports::{AliasTable, Import, ImportSet};
use crate::types::{NamedType, SignatureType, TypeExpr};
use std::fmt;

/// Resolved type spelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedType {
    /// Number of leading pointer levels.
    pub pointer_depth: usize,
    /// Spelling of the innermost non-pointer type.
    pub spelling: String,
}

impl ResolvedType {
    /// Creates a resolved type.
    #[must_use]
    pub fn new(pointer_depth: usize, spelling: impl Into<String>) -> Self {
        Self {
            pointer_depth,
            spelling: spelling.into(),
        }
    }

    /// Renders the pointer levels as `*` markers.
    #[must_use]
    pub fn pointer_prefix(&self) -> String {
        "*".repeat(self.pointer_depth)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.pointer_depth {
            f.write_str("*")?;
        }
        f.write_str(&self.spelling)
    }
}

/// Resolves field types of one compilation unit.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    self_module: String,
    aliases: &'a AliasTable,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for the unit at `self_module`.
    #[must_use]
    pub fn new(self_module: impl Into<String>, aliases: &'a AliasTable) -> Self {
        Self {
            self_module: self_module.into(),
            aliases,
        }
    }

    /// Resolves `expr`, recording referenced modules into `imports`.
    pub fn resolve(&self, expr: &TypeExpr, imports: &mut ImportSet) -> ResolvedType {
        ResolvedType::new(expr.pointer_depth(), self.spell(expr.pointee(), imports))
    }

    fn spell(&self, expr: &TypeExpr, imports: &mut ImportSet) -> String {
        match expr {
            TypeExpr::Pointer(_) => self.resolve(expr, imports).to_string(),
            TypeExpr::Named(named) => self.spell_named(named, imports),
            TypeExpr::Record(text) => self.requalify(text, imports),
            TypeExpr::Signature(signature) => self.spell_signature(signature, imports),
            TypeExpr::Sequence(element) => format!("[]{}", self.resolve(element, imports)),
            TypeExpr::FixedArray { length, element } => {
                format!("[{length}]{}", self.resolve(element, imports))
            }
            TypeExpr::Map { key, value } => {
                let key = self.resolve(key, imports);
                format!("map[{key}]{}", self.resolve(value, imports))
            }
            TypeExpr::Primitive(spelling) => spelling.clone(),
        }
    }

    fn spell_named(&self, named: &NamedType, imports: &mut ImportSet) -> String {
        let mut out = match self.qualifier(&named.module, imports) {
            Some(qualifier) => format!("{qualifier}.{}", named.name),
            None => named.name.clone(),
        };

        if !named.type_args.is_empty() {
            let args: Vec<String> = named
                .type_args
                .iter()
                .map(|arg| self.resolve(arg, imports).to_string())
                .collect();
            out.push('[');
            out.push_str(&args.join(", "));
            out.push(']');
        }

        out
    }

    fn spell_signature(&self, signature: &SignatureType, imports: &mut ImportSet) -> String {
        let last = signature.params.len().saturating_sub(1);
        let params: Vec<String> = signature
            .params
            .iter()
            .enumerate()
            .map(|(idx, param)| match param {
                TypeExpr::Sequence(element) if signature.variadic && idx == last => {
                    format!("...{}", self.resolve(element, imports))
                }
                _ => self.resolve(param, imports).to_string(),
            })
            .collect();
        let results: Vec<String> = signature
            .results
            .iter()
            .map(|result| self.resolve(result, imports).to_string())
            .collect();

        let mut out = format!("func({})", params.join(", "));
        match results.as_slice() {
            [] => {}
            [single] => {
                out.push(' ');
                out.push_str(single);
            }
            many => {
                out.push_str(" (");
                out.push_str(&many.join(", "));
                out.push(')');
            }
        }
        out
    }

    fn requalify(&self, text: &str, imports: &mut ImportSet) -> String {
        rewrite_qualifiers(text, |module| {
            self.qualifier(module, imports).unwrap_or_default()
        })
    }

    /// Returns the qualifier for `module`, or `None` when names from it are
    /// spelled bare. Foreign modules are recorded into `imports`; the alias
    /// of the first recording sticks.
    fn qualifier(&self, module: &str, imports: &mut ImportSet) -> Option<String> {
        if module.is_empty() || module == self.self_module {
            return None;
        }

        let key = module.to_string();
        if let Some(existing) = imports.get(&key) {
            return Some(existing.qualifier());
        }

        let alias = self.aliases.qualifier_for(module);
        tracing::debug!("Registering import {} as {}", module, alias);
        // The key was just checked, so the duplicate handler cannot run.
        let _ = imports.append(Import::aliased(alias.clone(), key));
        Some(alias)
    }
}

/// Rewrites every module qualifier in `text`.
///
/// `text` is split into qualified identifier tokens (`<module>.<Ident>`);
/// the qualifier of each is replaced by `rewrite(module)`, or dropped along
/// with its dot when that returns an empty string. Quoted literals are
/// copied unchanged.
pub fn rewrite_qualifiers<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '"' || c == '`' {
            let end = quoted_len(rest, c);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
        } else if is_token_char(c) {
            let end = rest
                .find(|ch: char| !is_token_char(ch))
                .unwrap_or(rest.len());
            requalify_token(&rest[..end], &mut rewrite, &mut out);
            rest = &rest[end..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

fn requalify_token<F>(token: &str, rewrite: &mut F, out: &mut String)
where
    F: FnMut(&str) -> String,
{
    let body = token.trim_start_matches('.');
    out.push_str(&token[..token.len() - body.len()]);

    let Some((module, ident)) = body.rsplit_once('.') else {
        out.push_str(body);
        return;
    };

    let qualifies = !module.is_empty()
        && !module.starts_with(|c: char| c.is_ascii_digit())
        && ident.starts_with(|c: char| c.is_alphabetic() || c == '_');
    if !qualifies {
        out.push_str(body);
        return;
    }

    let alias = rewrite(module);
    if !alias.is_empty() {
        out.push_str(&alias);
        out.push('.');
    }
    out.push_str(ident);
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-' | '~')
}

fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' && quote == '"' {
            escaped = true;
        } else if c == quote {
            return idx + c.len_utf8();
        }
    }
    text.len()
}
