// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! OpenRPC document types.
//!
//! The subset of OpenRPC 1.2 (and the JSON Schema it embeds) needed to describe
//! primitive, composite, union and reference shapes.
//! See: https://spec.open-rpc.org/

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const OPENRPC_VERSION: &str = "1.2.4";

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// The root OpenRPC document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRpcDocument {
    /// The OpenRPC specification version
    pub openrpc: String,
    /// Metadata about the API
    pub info: InfoObject,
    /// The available RPC methods, sorted by name once assembled
    pub methods: Vec<MethodObject>,
    /// Reusable schema components
    pub components: Components,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl OpenRpcDocument {
    pub fn new(info: InfoObject) -> Self {
        Self {
            openrpc: OPENRPC_VERSION.to_string(),
            info,
            methods: Vec::new(),
            components: Components::default(),
            external_docs: None,
        }
    }

    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.external_docs = Some(external_docs);
        self
    }

    pub fn with_method(mut self, method: MethodObject) -> Self {
        self.methods.push(method);
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodObject> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Follow a `$ref` into the components table.
    pub fn resolve_ref<'a>(&'a self, schema: &'a SchemaNode) -> Option<&'a SchemaNode> {
        match schema.component_key() {
            Some(key) => self.components.schemas.get(key),
            None => Some(schema),
        }
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoObject {
    /// The title of the API
    pub title: String,
    /// A description of the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// The version of the API (not the OpenRPC spec version)
    pub version: String,
}

impl InfoObject {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            terms_of_service: None,
            license: None,
            version: version.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.terms_of_service = Some(url.into());
        self
    }

    pub fn with_license(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.license = Some(License {
            name: name.into(),
            url: url.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocs {
    pub description: String,
    pub url: String,
}

/// How a client passes parameters. Generated methods are always positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParamStructure {
    #[default]
    #[serde(rename = "by-position")]
    ByPosition,
}

/// An RPC method definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodObject {
    /// The qualified name of the method (`namespace` + separator + method)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub params: Vec<ContentDescriptor>,
    pub result: ContentDescriptor,
    #[serde(rename = "paramStructure", default)]
    pub param_structure: ParamStructure,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl MethodObject {
    pub fn new(name: impl Into<String>, result: ContentDescriptor) -> Self {
        Self {
            name: name.into(),
            summary: None,
            description: None,
            params: Vec::new(),
            result,
            param_structure: ParamStructure::ByPosition,
            external_docs: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_param(mut self, param: ContentDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.external_docs = Some(external_docs);
        self
    }
}

/// Describes a method parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this parameter is required (OpenRPC default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub schema: SchemaNode,
}

impl ContentDescriptor {
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            summary: None,
            description: None,
            required: None,
            schema,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }
}

/// Reusable schema components, keyed by content key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Components {
    pub schemas: BTreeMap<String, SchemaNode>,
}

/// A JSON Schema node.
///
/// A node is either concrete, or a pure reference that only carries `$ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchemaNode {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// For string types, allowed enum values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// For object types, property schemas in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaNode>,

    /// Locally embedded definitions. Never emitted by the generator once
    /// deduplicated; shared structure lives in the components table.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SchemaNode>,
}

/// The `items` keyword: either one schema for every element, or a tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    Single(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
}

impl SchemaNode {
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    /// A schema accepting any value.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn integer() -> Self {
        Self::new("integer")
    }

    pub fn number() -> Self {
        Self::new("number")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn null() -> Self {
        Self::new("null")
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(SchemaItems::Single(Box::new(items))),
            ..Default::default()
        }
    }

    pub fn tuple(items: Vec<SchemaNode>) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(SchemaItems::Tuple(items)),
            ..Default::default()
        }
    }

    pub fn one_of(alternatives: Vec<SchemaNode>) -> Self {
        Self {
            one_of: alternatives,
            ..Default::default()
        }
    }

    /// A pure reference to a schema in the components table.
    pub fn component(key: &str) -> Self {
        Self {
            reference: Some(format!("{COMPONENT_SCHEMA_PREFIX}{key}")),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    pub fn with_definition(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }

    /// True if this node carries a `$ref` and nothing else.
    pub fn is_reference(&self) -> bool {
        match &self.reference {
            Some(reference) => *self == Self::component_ref_only(reference),
            None => false,
        }
    }

    /// The components-table key this node points at, if it is a reference into it.
    pub fn component_key(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|reference| reference.strip_prefix(COMPONENT_SCHEMA_PREFIX))
    }

    fn component_ref_only(reference: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            ..Default::default()
        }
    }
}
