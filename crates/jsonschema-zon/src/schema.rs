use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use zon::Validator;

use crate::{error::CompileError, generate::generate, options::CompileOptions, registry::Registry};

/// A parsed JSON Schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub(crate) id: String,
    pub(crate) version: String,
    pub(crate) registry: Registry,
    pub(crate) root: SchemaNode,
}

impl SchemaDocument {
    /// Parse a document with the default options.
    ///
    /// # Errors
    ///
    /// Fails if the document has no `$id` or if any of its schemas is malformed.
    pub fn parse(raw: &Value) -> Result<SchemaDocument, CompileError> {
        CompileOptions::default().parse(raw)
    }

    /// Generate a validator for the root schema.
    ///
    /// # Errors
    ///
    /// Fails if a `$ref` names an undefined or purely circular definition.
    pub fn generate(&self) -> Result<Validator, CompileError> {
        generate(&self.root, &self.registry)
    }

    /// The `$id` of the document.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `$schema` of the document, empty when absent.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up an entry of `$defs` by its name.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.registry.get(&Registry::definition_key(name))
    }

    /// Entries of `$defs` in declaration order, as `(reference key, schema)` pairs.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.registry.iter()
    }
}

/// A single schema in the supported subset of JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Boolean,
    String,
    Integer,
    Number,
    Object(ObjectNode),
    Array(ArrayNode),
    /// Accepts values structurally equal to one of the members.
    Enum(Vec<Value>),
    /// Accepts values structurally equal to the literal.
    Const(Value),
    /// A key into the document's [`Registry`], e.g. `#/$defs/Foo`.
    Ref(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    pub(crate) properties: IndexMap<String, SchemaNode>,
    pub(crate) required: IndexSet<String>,
    pub(crate) additional_properties: AdditionalProperties,
}

impl ObjectNode {
    /// An object schema with the given properties, required names and policy for undeclared
    /// properties.
    ///
    /// ```rust
    /// use jsonschema_zon::{AdditionalProperties, ObjectNode, Registry, SchemaNode};
    /// use serde_json::json;
    ///
    /// let node = SchemaNode::Object(ObjectNode::new(
    ///     [("name", SchemaNode::String)],
    ///     ["name"],
    ///     AdditionalProperties::Forbidden,
    /// ));
    /// let validator = jsonschema_zon::generate(&node, &Registry::new()).expect("Valid schema");
    /// assert!(validator.is_valid(&json!({"name": "Ada"})));
    /// assert!(!validator.is_valid(&json!({"name": "Ada", "age": 36})));
    /// ```
    pub fn new<P, K, R, N>(
        properties: P,
        required: R,
        additional_properties: AdditionalProperties,
    ) -> Self
    where
        P: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
        R: IntoIterator<Item = N>,
        N: Into<String>,
    {
        ObjectNode {
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
            required: required.into_iter().map(Into::into).collect(),
            additional_properties,
        }
    }

    /// Declared properties in document order.
    pub fn properties(&self) -> &IndexMap<String, SchemaNode> {
        &self.properties
    }

    /// Names listed in `required`. They may include undeclared properties.
    pub fn required(&self) -> &IndexSet<String> {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional_properties
    }
}

/// Policy for properties not declared in `properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdditionalProperties {
    /// `additionalProperties` is absent: undeclared properties are not checked.
    #[default]
    Unspecified,
    /// `additionalProperties: false`.
    Forbidden,
    Schema(Box<SchemaNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayNode {
    /// `items` alone: every element satisfies one schema.
    List { items: Box<SchemaNode> },
    /// `prefixItems`: positional schemas, with `items` governing the rest.
    Tuple {
        prefix_items: Vec<SchemaNode>,
        extra: ExtraItems,
    },
}

/// Policy for tuple elements past `prefixItems`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExtraItems {
    /// `items` is absent.
    #[default]
    Anything,
    /// `items: false`.
    Forbidden,
    Schema(Box<SchemaNode>),
}
