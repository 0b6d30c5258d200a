//! Generation of validators from schema nodes.
use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace};
use zon::{Slot, Validator};

use crate::{
    error::CompileError,
    registry::Registry,
    schema::{AdditionalProperties, ArrayNode, ExtraItems, ObjectNode, SchemaNode},
};

/// Generate a validator for `node`, resolving references through `registry`.
///
/// Every call builds a fresh validator tree.
///
/// # Errors
///
/// Fails if a `$ref` names an undefined key, or a key whose definition only refers to other
/// references in a cycle.
pub fn generate(node: &SchemaNode, registry: &Registry) -> Result<Validator, CompileError> {
    let validator = Generator::new(registry).generate(node)?;
    debug!("Generated validator");
    Ok(validator)
}

struct Generator<'r> {
    registry: &'r Registry,
    // References whose targets are being generated. Nested references to them are deferred.
    in_progress: AHashMap<String, Slot>,
}

impl<'r> Generator<'r> {
    fn new(registry: &'r Registry) -> Self {
        Generator {
            registry,
            in_progress: AHashMap::new(),
        }
    }

    fn generate(&mut self, node: &SchemaNode) -> Result<Validator, CompileError> {
        match node {
            SchemaNode::Boolean => Ok(zon::boolean()),
            SchemaNode::String => Ok(zon::string()),
            SchemaNode::Integer => Ok(zon::integer_number()),
            SchemaNode::Number => Ok(zon::float_number()),
            SchemaNode::Enum(members) => Ok(zon::enumeration(members.clone())),
            SchemaNode::Const(value) => Ok(zon::literal(value.clone())),
            SchemaNode::Ref(reference) => self.generate_ref(reference),
            SchemaNode::Object(object) => self.generate_object(object),
            SchemaNode::Array(array) => self.generate_array(array),
        }
    }

    fn generate_ref(&mut self, reference: &str) -> Result<Validator, CompileError> {
        let (key, target) = self.resolve(reference)?;
        if let Some(slot) = self.in_progress.get(key) {
            trace!(reference, "Deferring recursive reference");
            return Ok(slot.reference());
        }
        trace!(reference, key, "Resolved reference");
        self.in_progress.insert(key.to_string(), Slot::new());
        let generated = self.generate(target);
        let slot = self.in_progress.remove(key);
        let validator = generated?;
        Ok(match slot {
            Some(slot) => slot.bind(validator),
            None => validator,
        })
    }

    /// Follow `reference` through aliases (definitions that are references themselves) to the
    /// first definition that is not a reference.
    fn resolve<'a>(&self, reference: &'a str) -> Result<(&'a str, &'a SchemaNode), CompileError>
    where
        'r: 'a,
    {
        let registry: &'a Registry = self.registry;
        let mut key = reference;
        let mut visited = AHashSet::new();
        loop {
            let node = registry
                .get(key)
                .ok_or_else(|| CompileError::UnresolvedRef {
                    reference: key.to_string(),
                })?;
            match node {
                SchemaNode::Ref(next) => {
                    if !visited.insert(key) {
                        return Err(CompileError::CircularRef {
                            reference: reference.to_string(),
                        });
                    }
                    key = next.as_str();
                }
                _ => return Ok((key, node)),
            }
        }
    }

    fn generate_object(&mut self, object: &ObjectNode) -> Result<Validator, CompileError> {
        let mut fields = Vec::with_capacity(object.properties.len() + object.required.len());
        for (name, schema) in &object.properties {
            let mut validator = self.generate(schema)?.optional();
            if object.is_required(name) {
                validator = validator.unwrap();
            }
            fields.push((name.clone(), validator));
        }
        // A required name without a declared schema must be present. Its value is checked by
        // the `additionalProperties` schema if there is one, and is unconstrained otherwise.
        for name in &object.required {
            if !object.properties.contains_key(name) {
                let validator = match &object.additional_properties {
                    AdditionalProperties::Schema(schema) => self.generate(schema)?,
                    AdditionalProperties::Unspecified | AdditionalProperties::Forbidden => {
                        zon::anything()
                    }
                };
                fields.push((name.clone(), validator));
            }
        }
        let record = zon::record(fields);
        let record = match &object.additional_properties {
            AdditionalProperties::Unspecified => record.passthrough(),
            AdditionalProperties::Forbidden => record.strict(),
            AdditionalProperties::Schema(schema) => record.catchall(self.generate(schema)?),
        };
        Ok(record.into())
    }

    fn generate_array(&mut self, array: &ArrayNode) -> Result<Validator, CompileError> {
        match array {
            ArrayNode::List { items } => Ok(zon::element_list(self.generate(items)?)),
            ArrayNode::Tuple {
                prefix_items,
                extra,
            } => {
                let prefix = prefix_items
                    .iter()
                    .map(|schema| self.generate(schema))
                    .collect::<Result<Vec<_>, _>>()?;
                let rest = match extra {
                    ExtraItems::Anything => zon::anything(),
                    ExtraItems::Forbidden => zon::never(),
                    ExtraItems::Schema(schema) => self.generate(schema)?,
                };
                Ok(zon::element_tuple(prefix).rest(rest).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate;
    use crate::{
        error::CompileError,
        registry::Registry,
        schema::{AdditionalProperties, ObjectNode, SchemaNode},
    };
    use serde_json::json;

    fn registry(entries: &[(&str, SchemaNode)]) -> Registry {
        let mut registry = Registry::new();
        for (name, node) in entries {
            registry.insert(Registry::definition_key(name), node.clone());
        }
        registry
    }

    #[test]
    fn leaf_validators() {
        let registry = Registry::new();
        let validator = generate(&SchemaNode::String, &registry).expect("Valid schema");
        assert!(validator.is_valid(&json!("x")));
        assert!(!validator.is_valid(&json!(5)));
    }

    #[test]
    fn each_call_builds_a_fresh_validator() {
        let registry = registry(&[("Pos", SchemaNode::Integer)]);
        let node = SchemaNode::Ref("#/$defs/Pos".to_string());
        let first = generate(&node, &registry).expect("Valid schema");
        let second = generate(&node, &registry).expect("Valid schema");
        assert!(first.is_valid(&json!(1)));
        assert!(second.is_valid(&json!(1)));
        assert!(!second.is_valid(&json!("1")));
    }

    #[test]
    fn alias_chain() {
        let registry = registry(&[
            ("A", SchemaNode::Ref("#/$defs/B".to_string())),
            ("B", SchemaNode::Boolean),
        ]);
        let validator = generate(&SchemaNode::Ref("#/$defs/A".to_string()), &registry)
            .expect("Valid schema");
        assert!(validator.is_valid(&json!(true)));
        assert!(!validator.is_valid(&json!(1)));
    }

    #[test]
    fn unresolved_ref() {
        let error = generate(&SchemaNode::Ref("#/$defs/Nope".to_string()), &Registry::new())
            .expect_err("Should fail");
        assert!(
            matches!(error, CompileError::UnresolvedRef { ref reference } if reference == "#/$defs/Nope")
        );
    }

    #[test]
    fn unresolved_alias_target() {
        let registry = registry(&[("A", SchemaNode::Ref("#/$defs/Gone".to_string()))]);
        let error = generate(&SchemaNode::Ref("#/$defs/A".to_string()), &registry)
            .expect_err("Should fail");
        assert!(
            matches!(error, CompileError::UnresolvedRef { ref reference } if reference == "#/$defs/Gone")
        );
    }

    #[test]
    fn unresolved_ref_inside_unused_branch_still_fails() {
        let object = ObjectNode {
            properties: [(
                "never_present".to_string(),
                SchemaNode::Ref("#/$defs/Nope".to_string()),
            )]
            .into_iter()
            .collect(),
            ..ObjectNode::default()
        };
        let result = generate(&SchemaNode::Object(object), &Registry::new());
        assert!(matches!(result, Err(CompileError::UnresolvedRef { .. })));
    }

    #[test]
    fn self_alias_is_circular() {
        let registry = registry(&[("A", SchemaNode::Ref("#/$defs/A".to_string()))]);
        let error = generate(&SchemaNode::Ref("#/$defs/A".to_string()), &registry)
            .expect_err("Should fail");
        assert!(matches!(error, CompileError::CircularRef { .. }));
    }

    #[test]
    fn recursion_through_an_object() {
        let node = SchemaNode::Object(ObjectNode {
            properties: [
                ("value".to_string(), SchemaNode::Integer),
                ("next".to_string(), SchemaNode::Ref("#/$defs/List".to_string())),
            ]
            .into_iter()
            .collect(),
            required: ["value".to_string()].into_iter().collect(),
            additional_properties: AdditionalProperties::Forbidden,
        });
        let registry = registry(&[("List", node)]);
        let validator = generate(&SchemaNode::Ref("#/$defs/List".to_string()), &registry)
            .expect("Valid schema");
        assert!(validator.is_valid(&json!({"value": 1})));
        assert!(validator.is_valid(&json!({"value": 1, "next": {"value": 2, "next": {"value": 3}}})));
        assert!(!validator.is_valid(&json!({"value": 1, "next": {"value": 2, "next": {}}})));
        assert!(!validator.is_valid(&json!({"value": 1, "next": {"value": 2, "extra": true}})));
    }
}
