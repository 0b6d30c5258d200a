//! Compilation of raw JSON into schema nodes.
//!
//! Dispatch is keyword-based and the first match wins: `type`, then `enum`, then `const`, then
//! `$ref`. Keywords outside of the supported subset are ignored.
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    error::CompileError,
    registry::Registry,
    schema::{AdditionalProperties, ArrayNode, ExtraItems, ObjectNode, SchemaDocument, SchemaNode},
};

pub(crate) struct Compiler {
    max_depth: usize,
}

impl Compiler {
    pub(crate) fn new(max_depth: usize) -> Self {
        Compiler { max_depth }
    }

    pub(crate) fn parse_document(&self, raw: &Value) -> Result<SchemaDocument, CompileError> {
        let Value::Object(contents) = raw else {
            return Err(CompileError::UnrecognizedSchemaShape {
                fragment: raw.clone(),
            });
        };
        let id = match contents.get("$id") {
            Some(Value::String(id)) => id.clone(),
            Some(value) => {
                return Err(CompileError::InvalidKeyword {
                    keyword: "$id",
                    value: value.clone(),
                })
            }
            None => return Err(CompileError::MissingId),
        };
        let version = contents
            .get("$schema")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // Definitions go first, so that every `$ref` in the document has a target by the time
        // the validator is generated.
        let mut registry = Registry::new();
        if let Some(defs) = contents.get("$defs") {
            let Value::Object(defs) = defs else {
                return Err(CompileError::InvalidKeyword {
                    keyword: "$defs",
                    value: defs.clone(),
                });
            };
            for (name, schema) in defs {
                let node = self
                    .parse_node(schema, 1)
                    .map_err(|error| error.within(&["$defs", name.as_str()]))?;
                trace!(name = name.as_str(), "Registered definition");
                registry.insert(Registry::definition_key(name), node);
            }
        }

        let root = self.parse_node(raw, 0)?;
        debug!(
            id = id.as_str(),
            definitions = registry.len(),
            "Parsed schema document"
        );
        Ok(SchemaDocument {
            id,
            version,
            registry,
            root,
        })
    }

    pub(crate) fn parse_node(&self, value: &Value, depth: usize) -> Result<SchemaNode, CompileError> {
        if depth > self.max_depth {
            return Err(CompileError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let Value::Object(contents) = value else {
            return Err(CompileError::UnrecognizedSchemaShape {
                fragment: value.clone(),
            });
        };
        if let Some(ty) = contents.get("type") {
            return match ty.as_str() {
                Some("object") => self.parse_object(contents, depth).map(SchemaNode::Object),
                Some("array") => self
                    .parse_array(value, contents, depth)
                    .map(SchemaNode::Array),
                Some("integer") => Ok(SchemaNode::Integer),
                Some("number") => Ok(SchemaNode::Number),
                Some("boolean") => Ok(SchemaNode::Boolean),
                Some("string") => Ok(SchemaNode::String),
                _ => Err(CompileError::UnknownType {
                    ty: ty.clone(),
                    fragment: value.clone(),
                }),
            };
        }
        if let Some(items) = contents.get("enum") {
            return match items {
                Value::Array(items) => Ok(SchemaNode::Enum(items.clone())),
                _ => Err(CompileError::InvalidKeyword {
                    keyword: "enum",
                    value: items.clone(),
                }),
            };
        }
        if let Some(constant) = contents.get("const") {
            return Ok(SchemaNode::Const(constant.clone()));
        }
        if let Some(reference) = contents.get("$ref") {
            return match reference {
                Value::String(reference) => Ok(SchemaNode::Ref(reference.clone())),
                _ => Err(CompileError::InvalidKeyword {
                    keyword: "$ref",
                    value: reference.clone(),
                }),
            };
        }
        Err(CompileError::UnrecognizedSchemaShape {
            fragment: value.clone(),
        })
    }

    fn parse_object(
        &self,
        contents: &Map<String, Value>,
        depth: usize,
    ) -> Result<ObjectNode, CompileError> {
        let mut properties = IndexMap::new();
        match contents.get("properties") {
            Some(Value::Object(declared)) => {
                properties.reserve(declared.len());
                for (name, schema) in declared {
                    let node = self
                        .parse_node(schema, depth + 1)
                        .map_err(|error| error.within(&["properties", name.as_str()]))?;
                    properties.insert(name.clone(), node);
                }
            }
            Some(value) => {
                return Err(CompileError::InvalidKeyword {
                    keyword: "properties",
                    value: value.clone(),
                })
            }
            None => {}
        }

        let mut required = IndexSet::new();
        match contents.get("required") {
            Some(value @ Value::Array(names)) => {
                for name in names {
                    let Value::String(name) = name else {
                        return Err(CompileError::InvalidRequired {
                            value: value.clone(),
                        });
                    };
                    required.insert(name.clone());
                }
            }
            Some(value) => {
                return Err(CompileError::InvalidRequired {
                    value: value.clone(),
                })
            }
            None => {}
        }

        let additional_properties = match contents.get("additionalProperties") {
            None => AdditionalProperties::Unspecified,
            Some(Value::Bool(false)) => AdditionalProperties::Forbidden,
            Some(schema @ Value::Object(_)) => AdditionalProperties::Schema(Box::new(
                self.parse_node(schema, depth + 1)
                    .map_err(|error| error.within(&["additionalProperties"]))?,
            )),
            Some(value) => {
                return Err(CompileError::InvalidAdditionalProperties {
                    value: value.clone(),
                })
            }
        };

        Ok(ObjectNode {
            properties,
            required,
            additional_properties,
        })
    }

    fn parse_array(
        &self,
        value: &Value,
        contents: &Map<String, Value>,
        depth: usize,
    ) -> Result<ArrayNode, CompileError> {
        if let Some(prefix) = contents.get("prefixItems") {
            let Value::Array(prefix) = prefix else {
                return Err(CompileError::InvalidKeyword {
                    keyword: "prefixItems",
                    value: prefix.clone(),
                });
            };
            let mut prefix_items = Vec::with_capacity(prefix.len());
            for (idx, schema) in prefix.iter().enumerate() {
                let node = self
                    .parse_node(schema, depth + 1)
                    .map_err(|error| error.within(&["prefixItems", idx.to_string().as_str()]))?;
                prefix_items.push(node);
            }
            let extra = match contents.get("items") {
                None => ExtraItems::Anything,
                Some(Value::Bool(false)) => ExtraItems::Forbidden,
                Some(schema) => ExtraItems::Schema(Box::new(
                    self.parse_node(schema, depth + 1)
                        .map_err(|error| error.within(&["items"]))?,
                )),
            };
            Ok(ArrayNode::Tuple {
                prefix_items,
                extra,
            })
        } else if let Some(schema) = contents.get("items") {
            let items = self
                .parse_node(schema, depth + 1)
                .map_err(|error| error.within(&["items"]))?;
            Ok(ArrayNode::List {
                items: Box::new(items),
            })
        } else {
            Err(CompileError::MissingItems {
                fragment: value.clone(),
            })
        }
    }
}
