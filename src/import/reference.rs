//! Local `$ref` resolution for JSON Schema documents
//!
//! Only same-document references into the definitions containers are
//! supported: `#/definitions/<name>` and `#/$defs/<name>`.

use serde_json::{Map, Value};

use crate::convert::ConversionError;

const CONTAINERS: [(&str, &str); 2] = [("#/definitions/", "definitions"), ("#/$defs/", "$defs")];

/// Target of a parsed local reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRef {
    /// Container key in the root document (`definitions` or `$defs`)
    pub container: &'static str,
    /// Definition name with JSON Pointer escapes decoded
    pub name: String,
}

impl std::fmt::Display for DefinitionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#/{}/{}", self.container, self.name)
    }
}

/// Whether `reference` points into a definitions container
pub fn is_definition_reference(reference: &str) -> bool {
    CONTAINERS
        .iter()
        .any(|(prefix, _)| reference.starts_with(prefix))
}

/// Parse a `$ref` string into a definition reference
pub fn parse_reference(reference: &str) -> Result<DefinitionRef, ConversionError> {
    let (container, raw_name) = CONTAINERS
        .iter()
        .find_map(|(prefix, container)| {
            reference
                .strip_prefix(prefix)
                .map(|name| (*container, name))
        })
        .ok_or_else(|| {
            ConversionError::unresolved(
                reference,
                "only '#/definitions/<name>' and '#/$defs/<name>' references are supported",
            )
        })?;

    if raw_name.is_empty() || raw_name.contains('/') {
        return Err(ConversionError::unresolved(
            reference,
            "reference must name a single definition",
        ));
    }

    Ok(DefinitionRef {
        container,
        name: raw_name.replace("~1", "/").replace("~0", "~"),
    })
}

/// Looks up definitions in the root document
#[derive(Debug, Clone, Copy)]
pub struct DefinitionResolver<'a> {
    root: &'a Map<String, Value>,
}

impl<'a> DefinitionResolver<'a> {
    pub fn new(root: &'a Map<String, Value>) -> Self {
        Self { root }
    }

    /// Resolve a reference exactly one level
    pub fn resolve(
        &self,
        reference: &str,
    ) -> Result<(DefinitionRef, &'a Map<String, Value>), ConversionError> {
        let target = parse_reference(reference)?;

        let definitions = self
            .root
            .get(target.container)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ConversionError::unresolved(
                    reference,
                    format!("document has no '{}' section", target.container),
                )
            })?;

        let schema = definitions
            .get(&target.name)
            .ok_or_else(|| {
                ConversionError::unresolved(
                    reference,
                    format!("no definition named '{}'", target.name),
                )
            })?
            .as_object()
            .ok_or_else(|| {
                ConversionError::unresolved(reference, "definition is not a schema object")
            })?;

        Ok((target, schema))
    }

    /// Resolve a reference, chasing definitions that are themselves bare
    /// references when `follow_chains` is set
    pub fn resolve_chain(
        &self,
        reference: &str,
        follow_chains: bool,
    ) -> Result<(DefinitionRef, &'a Map<String, Value>), ConversionError> {
        let (mut target, mut schema) = self.resolve(reference)?;
        if !follow_chains {
            return Ok((target, schema));
        }

        let mut seen = vec![target.to_string()];
        while let Some(next) = chained_reference(schema) {
            let (next_target, next_schema) = self.resolve(next)?;
            let key = next_target.to_string();
            if seen.contains(&key) {
                seen.push(key);
                return Err(ConversionError::CircularReference(seen.join(" -> ")));
            }
            seen.push(key);
            target = next_target;
            schema = next_schema;
        }

        Ok((target, schema))
    }
}

/// `$ref` of a schema that is only an indirection (no own `properties`)
fn chained_reference(schema: &Map<String, Value>) -> Option<&str> {
    if schema.contains_key("properties") {
        return None;
    }
    schema.get("$ref").and_then(Value::as_str)
}

/// Definitions currently being expanded, innermost last
#[derive(Debug, Default)]
pub struct ExpansionStack {
    active: Vec<String>,
}

impl ExpansionStack {
    /// Push a definition, failing if it is already being expanded
    pub fn enter(&mut self, target: &DefinitionRef) -> Result<(), ConversionError> {
        let key = target.to_string();
        if let Some(start) = self.active.iter().position(|active| *active == key) {
            let mut cycle = self.active[start..].to_vec();
            cycle.push(key);
            return Err(ConversionError::CircularReference(cycle.join(" -> ")));
        }
        self.active.push(key);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.active.pop();
    }
}
