// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Mapping from semantic types to JSON Schema.
//!
//! Many values in this domain look like plain integers or byte arrays in
//! storage but travel as hex strings, so an override table is consulted before
//! any structural reflection.

use crate::openrpc::SchemaNode;
use crate::semantic::{CompositeField, SemanticType};

type SchemaFn = fn() -> SchemaNode;

/// Overrides, matched by exact semantic identity. Order matters only if an
/// identity were listed twice; the first entry wins.
static OVERRIDES: &[(SemanticType, SchemaFn)] = &[
    (SemanticType::Integer, integer_schema),
    (SemanticType::BlockNonce, integer_schema),
    (SemanticType::Hash, hash_schema),
    (SemanticType::Address, address_schema),
    (SemanticType::DataWord, data_word_schema),
    (SemanticType::Bytes, bytes_schema),
    (SemanticType::BlockNumberOrTag, block_number_or_tag_schema),
    (SemanticType::BlockNumberOrHash, block_number_or_hash_schema),
];

/// Reflect a semantic type into a schema. Never fails: a shape with no JSON
/// mapping yields a schema that accepts anything.
pub fn reflect(semantic_type: &SemanticType) -> SchemaNode {
    if let Some(schema) = override_schema(semantic_type) {
        return schema;
    }

    match semantic_type {
        SemanticType::Composite {
            name,
            description,
            fields,
        } => reflect_composite(name, description.as_deref(), fields),
        SemanticType::Collection { element } => SchemaNode::array(reflect(element)),
        SemanticType::Optional { inner } => reflect(inner),
        SemanticType::Int | SemanticType::Uint => SchemaNode::integer(),
        SemanticType::Float => SchemaNode::number(),
        SemanticType::Bool => SchemaNode::boolean(),
        SemanticType::String => SchemaNode::string(),
        _ => SchemaNode::any(),
    }
}

/// The override schema for a type, if it has one. `Optional` wrappers share
/// the entry of the type they wrap.
pub fn override_schema(semantic_type: &SemanticType) -> Option<SchemaNode> {
    let identity = semantic_type.without_optional();
    OVERRIDES
        .iter()
        .find(|(overridden, _)| overridden == identity)
        .map(|(_, schema)| schema())
}

fn reflect_composite(name: &str, description: Option<&str>, fields: &[CompositeField]) -> SchemaNode {
    let mut schema = SchemaNode::object()
        .with_title(name)
        .with_additional_properties(false);

    if let Some(description) = description {
        schema = schema.with_description(description);
    }

    let mut required = Vec::new();
    for field in fields {
        let mut field_schema = reflect(&field.semantic_type);
        if field_schema.description.is_none()
            && let Some(description) = &field.description
        {
            field_schema = field_schema.with_description(description);
        }

        if !field.semantic_type.is_optional() {
            required.push(field.name.clone());
        }
        schema = schema.with_property(&field.name, field_schema);
    }

    schema.with_required(required)
}

fn integer_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("integer")
        .with_pattern("^0x[a-fA-F0-9]+$")
        .with_description("Hex representation of the integer")
}

fn hash_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("keccak")
        .with_pattern(r"^0x[a-fA-F\d]{64}$")
        .with_description("Hex representation of a Keccak 256 hash")
}

fn address_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("address")
        .with_pattern(r"^0x[a-fA-F\d]{40}$")
}

fn data_word_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("dataWord")
        .with_pattern(r"^0x([a-fA-F\d]{64})?$")
        .with_description("Hex representation of a 256 bit unit of data")
}

fn bytes_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("bytes")
        .with_pattern("^0x([a-fA-F0-9]?)+$")
        .with_description("Hex representation of a variable length byte array")
}

fn block_number_tag_schema() -> SchemaNode {
    SchemaNode::string()
        .with_title("blockNumberTag")
        .with_description("The optional block height description")
        .with_enum_values(vec![
            "earliest".to_string(),
            "latest".to_string(),
            "pending".to_string(),
        ])
}

fn block_number_or_tag_schema() -> SchemaNode {
    SchemaNode::one_of(vec![integer_schema(), block_number_tag_schema()])
        .with_title("blockNumberOrTag")
        .with_description("Block tag or hex representation of a block number")
}

fn block_number_or_hash_schema() -> SchemaNode {
    SchemaNode::one_of(vec![hash_schema(), integer_schema()])
        .with_title("blockNumberOrHash")
        .with_description("Hex representation of a block number or hash")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openrpc::SchemaItems;

    #[test]
    fn test_hash_uses_override() {
        let schema = reflect(&SemanticType::Hash);

        assert_eq!(schema.schema_type.as_deref(), Some("string"));
        assert_eq!(schema.pattern.as_deref(), Some(r"^0x[a-fA-F\d]{64}$"));
        assert!(schema.properties.is_empty());
    }

    #[test]
    fn test_optional_shares_override_entry() {
        assert_eq!(
            reflect(&SemanticType::optional(SemanticType::Hash)),
            reflect(&SemanticType::Hash)
        );
        assert_eq!(
            reflect(&SemanticType::optional(SemanticType::optional(SemanticType::Integer))),
            reflect(&SemanticType::Integer)
        );
    }

    #[test]
    fn test_overrides_for_every_domain_type() {
        let json = serde_json::to_value(reflect(&SemanticType::Address)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "address",
                "type": "string",
                "pattern": r"^0x[a-fA-F\d]{40}$"
            })
        );

        assert_eq!(reflect(&SemanticType::BlockNonce), integer_schema());
        assert_eq!(
            reflect(&SemanticType::Bytes).pattern.as_deref(),
            Some("^0x([a-fA-F0-9]?)+$")
        );
    }

    #[test]
    fn test_block_number_or_tag() {
        let schema = reflect(&SemanticType::BlockNumberOrTag);

        assert_eq!(schema.title.as_deref(), Some("blockNumberOrTag"));
        assert_eq!(schema.schema_type, None);
        assert_eq!(schema.one_of.len(), 2);
        assert_eq!(schema.one_of[0].pattern.as_deref(), Some("^0x[a-fA-F0-9]+$"));
        assert_eq!(
            schema.one_of[1].enum_values,
            Some(vec![
                "earliest".to_string(),
                "latest".to_string(),
                "pending".to_string()
            ])
        );
    }

    #[test]
    fn test_block_number_or_hash() {
        let schema = reflect(&SemanticType::BlockNumberOrHash);
        assert_eq!(schema.one_of, vec![hash_schema(), integer_schema()]);
    }

    #[test]
    fn test_primitives() {
        assert_eq!(reflect(&SemanticType::Int), SchemaNode::integer());
        assert_eq!(reflect(&SemanticType::Uint), SchemaNode::integer());
        assert_eq!(reflect(&SemanticType::Float), SchemaNode::number());
        assert_eq!(reflect(&SemanticType::Bool), SchemaNode::boolean());
        assert_eq!(reflect(&SemanticType::String), SchemaNode::string());
        assert_eq!(reflect(&SemanticType::Any), SchemaNode::any());
    }

    #[test]
    fn test_unmapped_shapes_are_permissive() {
        assert_eq!(reflect(&SemanticType::Function), SchemaNode::any());
        assert_eq!(reflect(&SemanticType::Channel), SchemaNode::any());
    }

    #[test]
    fn test_composite() {
        let header = SemanticType::composite("Header")
            .with_description("A block header")
            .with_field(CompositeField::new("parentHash", SemanticType::Hash))
            .with_field(
                CompositeField::new("number", SemanticType::Uint).with_description("Block height"),
            )
            .with_field(CompositeField::new(
                "miner",
                SemanticType::optional(SemanticType::Address),
            ));

        let schema = reflect(&header);

        assert_eq!(schema.title.as_deref(), Some("Header"));
        assert_eq!(schema.schema_type.as_deref(), Some("object"));
        assert_eq!(schema.additional_properties, Some(false));
        assert_eq!(schema.properties["parentHash"], hash_schema());
        assert_eq!(
            schema.properties["number"].description.as_deref(),
            Some("Block height")
        );
        assert_eq!(schema.properties["miner"], address_schema());
        assert_eq!(
            schema.required,
            vec!["parentHash".to_string(), "number".to_string()]
        );
    }

    #[test]
    fn test_field_description_never_replaces_override() {
        let receipt = SemanticType::composite("Receipt").with_field(
            CompositeField::new("blockHash", SemanticType::Hash).with_description("Some hash"),
        );

        assert_eq!(reflect(&receipt).properties["blockHash"], hash_schema());
    }

    #[test]
    fn test_collection() {
        let schema = reflect(&SemanticType::collection(SemanticType::Address));

        assert_eq!(schema.schema_type.as_deref(), Some("array"));
        match schema.items {
            Some(SchemaItems::Single(item)) => assert_eq!(*item, address_schema()),
            other => panic!("unexpected items: {other:?}"),
        }
    }
}
