//! Host package description parser.
//!
//! This module parses the XML description of one host compilation unit
//! (its imports, its type declarations and every struct field's type tree)
//! into a [`Package`].

use crate::error::ParseError;
use crate::types::{
    FieldDef, ImportDecl, NamedType, OtherDef, Package, SignatureType, StructDef, TypeDecl,
    TypeExpr, is_exported,
};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parses a host package description from a string.
///
/// # Arguments
/// * `xml` - XML package description
///
/// # Returns
/// Parsed package or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid elements.
pub fn parse_package(xml: &str) -> Result<Package, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut package: Option<Package> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                match name.as_str() {
                    "package" => package = Some(parse_package_attrs(e)?),
                    "imports" => {
                        parse_imports(&mut reader, require_package(&mut package, &name)?)?;
                    }
                    "struct" => {
                        let def = parse_struct(&mut reader, e)?;
                        require_package(&mut package, &name)?.add_decl(TypeDecl::Struct(def));
                    }
                    "type" => {
                        let def = parse_other_decl(e)?;
                        skip_to_end(&mut reader)?;
                        require_package(&mut package, &name)?.add_decl(TypeDecl::Other(def));
                    }
                    other => return Err(ParseError::unknown_element(other, "package")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                match name.as_str() {
                    "package" => package = Some(parse_package_attrs(e)?),
                    "imports" => {}
                    "struct" => {
                        let def = StructDef::new(parse_name_attr(e, "struct")?);
                        require_package(&mut package, &name)?.add_decl(TypeDecl::Struct(def));
                    }
                    "type" => {
                        let def = parse_other_decl(e)?;
                        require_package(&mut package, &name)?.add_decl(TypeDecl::Other(def));
                    }
                    other => return Err(ParseError::unknown_element(other, "package")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    package.ok_or_else(|| ParseError::structure("No package element found"))
}

/// Parses a host package description file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_package_file(path: &Path) -> Result<Package, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_package(&xml)
}

fn require_package<'p>(
    package: &'p mut Option<Package>,
    element: &str,
) -> Result<&'p mut Package, ParseError> {
    package
        .as_mut()
        .ok_or_else(|| ParseError::structure(format!("<{element}> outside of <package>")))
}

/// Parses the package element attributes.
fn parse_package_attrs(e: &BytesStart<'_>) -> Result<Package, ParseError> {
    let mut name = None;
    let mut path = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value("package", key, &attr.value)?;

        match key {
            "name" => name = Some(value),
            "path" => path = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("package", "name"))?;
    let path = path.unwrap_or_else(|| name.clone());

    Ok(Package::new(name, path))
}

/// Parses the imports section.
fn parse_imports(reader: &mut Reader<&[u8]>, package: &mut Package) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                if name != "import" {
                    return Err(ParseError::unknown_element(name, "imports"));
                }
                package.add_import(parse_import(e)?);
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                if name != "import" {
                    return Err(ParseError::unknown_element(name, "imports"));
                }
                package.add_import(parse_import(e)?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("imports")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a single import declaration.
fn parse_import(e: &BytesStart<'_>) -> Result<ImportDecl, ParseError> {
    let mut path = None;
    let mut alias = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value("import", key, &attr.value)?;

        match key {
            "path" => path = Some(value),
            "alias" => alias = Some(value),
            _ => {}
        }
    }

    let path = path.ok_or_else(|| ParseError::missing_attr("import", "path"))?;

    Ok(ImportDecl::new(path, alias))
}

/// Parses a non-struct type declaration.
fn parse_other_decl(e: &BytesStart<'_>) -> Result<OtherDef, ParseError> {
    let mut name = None;
    let mut underlying = String::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value("type", key, &attr.value)?;

        match key {
            "name" => name = Some(value),
            "underlying" => underlying = value,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("type", "name"))?;

    Ok(OtherDef { name, underlying })
}

/// Parses a struct declaration and its fields.
fn parse_struct(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<StructDef, ParseError> {
    let mut def = StructDef::new(parse_name_attr(e, "struct")?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                if name != "field" {
                    return Err(ParseError::unknown_element(name, "struct"));
                }
                def.add_field(parse_field(reader, e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                if name != "field" {
                    return Err(ParseError::unknown_element(name, "struct"));
                }
                return Err(ParseError::structure(format!(
                    "field '{}' of struct '{}' has no type",
                    parse_name_attr(e, "field")?,
                    def.name
                )));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("struct")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(def)
}

/// Parses a struct field with its type tree.
fn parse_field(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<FieldDef, ParseError> {
    let mut name = None;
    let mut exported = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value("field", key, &attr.value)?;

        match key {
            "name" => name = Some(value),
            "exported" => {
                exported = Some(
                    value
                        .parse::<bool>()
                        .map_err(|_| ParseError::invalid_attr("field", "exported", &value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let ty = single_type("field", parse_type_list(reader, "field")?)?;
    let exported = exported.unwrap_or_else(|| is_exported(&name));

    Ok(FieldDef { name, ty, exported })
}

/// Parses child type elements until the enclosing end tag.
fn parse_type_list(
    reader: &mut Reader<&[u8]>,
    context: &str,
) -> Result<Vec<TypeExpr>, ParseError> {
    let mut types = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => types.push(parse_type(reader, e)?),
            Ok(Event::Empty(ref e)) => types.push(build_type(e, Vec::new())?),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(context)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(types)
}

/// Parses a type element with content.
fn parse_type(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<TypeExpr, ParseError> {
    let name = element_name(e)?;
    if name == "func" {
        return parse_signature(reader, e);
    }

    let children = parse_type_list(reader, &name)?;
    build_type(e, children)
}

/// Parses a function type with `params` and `results` sections.
fn parse_signature(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<TypeExpr, ParseError> {
    let mut signature = SignatureType {
        variadic: parse_variadic_attr(e)?,
        ..SignatureType::default()
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                match name.as_str() {
                    "params" => signature.params = parse_type_list(reader, "params")?,
                    "results" => signature.results = parse_type_list(reader, "results")?,
                    _ => return Err(ParseError::unknown_element(name, "func")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                if name != "params" && name != "results" {
                    return Err(ParseError::unknown_element(name, "func"));
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("func")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(TypeExpr::Signature(signature))
}

/// Builds a type expression from an element and its parsed children.
fn build_type(e: &BytesStart<'_>, children: Vec<TypeExpr>) -> Result<TypeExpr, ParseError> {
    let element = element_name(e)?;

    match element.as_str() {
        "pointer" => Ok(TypeExpr::Pointer(Box::new(single_type(
            &element, children,
        )?))),
        "slice" => Ok(TypeExpr::Sequence(Box::new(single_type(
            &element, children,
        )?))),
        "array" => {
            let mut length = None;
            for attr in e.attributes().flatten() {
                let key = std::str::from_utf8(attr.key.as_ref())?;
                if key == "length" {
                    let value = attr_value("array", key, &attr.value)?;
                    length = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| ParseError::invalid_attr("array", "length", &value))?,
                    );
                }
            }
            let length = length.ok_or_else(|| ParseError::missing_attr("array", "length"))?;
            Ok(TypeExpr::FixedArray {
                length,
                element: Box::new(single_type(&element, children)?),
            })
        }
        "map" => {
            let count = children.len();
            let [key, value]: [TypeExpr; 2] = children.try_into().map_err(|_| {
                ParseError::structure(format!("<map> expects exactly two types, found {count}"))
            })?;
            Ok(TypeExpr::map(key, value))
        }
        "named" => {
            let mut module = String::new();
            let mut name = None;
            for attr in e.attributes().flatten() {
                let key = std::str::from_utf8(attr.key.as_ref())?;
                let value = attr_value("named", key, &attr.value)?;
                match key {
                    "module" => module = value,
                    "name" => name = Some(value),
                    _ => {}
                }
            }
            let name = name.ok_or_else(|| ParseError::missing_attr("named", "name"))?;
            Ok(TypeExpr::Named(
                NamedType::new(module, name).with_args(children),
            ))
        }
        "primitive" | "record" => {
            if !children.is_empty() {
                return Err(ParseError::structure(format!(
                    "<{element}> cannot contain nested types"
                )));
            }
            let spelling = parse_spelling_attr(e, &element)?;
            if element == "primitive" {
                Ok(TypeExpr::Primitive(spelling))
            } else {
                Ok(TypeExpr::Record(spelling))
            }
        }
        "func" => Ok(TypeExpr::Signature(SignatureType {
            variadic: parse_variadic_attr(e)?,
            ..SignatureType::default()
        })),
        other => Err(ParseError::unknown_element(other, "type")),
    }
}

/// Takes the only type out of `types`.
fn single_type(context: &str, types: Vec<TypeExpr>) -> Result<TypeExpr, ParseError> {
    let count = types.len();
    let mut iter = types.into_iter();
    match (iter.next(), iter.next()) {
        (Some(ty), None) => Ok(ty),
        _ => Err(ParseError::structure(format!(
            "<{context}> expects exactly one type, found {count}"
        ))),
    }
}

fn parse_name_attr(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            return attr_value(element, key, &attr.value);
        }
    }
    Err(ParseError::missing_attr(element, "name"))
}

fn parse_spelling_attr(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "spelling" {
            return attr_value(element, key, &attr.value);
        }
    }
    Err(ParseError::missing_attr(element, "spelling"))
}

fn parse_variadic_attr(e: &BytesStart<'_>) -> Result<bool, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "variadic" {
            let value = attr_value("func", key, &attr.value)?;
            return value
                .parse::<bool>()
                .map_err(|_| ParseError::invalid_attr("func", "variadic", &value));
        }
    }
    Ok(false)
}

/// Decodes and unescapes an attribute value.
fn attr_value(element: &str, key: &str, raw: &[u8]) -> Result<String, ParseError> {
    let raw = std::str::from_utf8(raw)?;
    unescape(raw)
        .map(|value| value.into_owned())
        .map_err(|_| ParseError::invalid_attr(element, key, raw))
}

fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

fn unexpected_eof(context: &str) -> ParseError {
    ParseError::structure(format!("unexpected end of document inside <{context}>"))
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
