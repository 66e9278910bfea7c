// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Content-addressed schema deduplication.
//!
//! Every concrete node in every parameter and result schema is moved into
//! `components.schemas` under a key derived from its content, and replaced in
//! place by a `$ref`. Children are rewritten before their parent, so a parent's
//! key covers references rather than whole subtrees. Structurally identical
//! nodes anywhere in the document end up as one component.

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::SchemaEncodingError;
use crate::openrpc::{OpenRpcDocument, SchemaItems, SchemaNode};

/// Bytes of the digest rendered into a key.
const DIGEST_PREFIX_LEN: usize = 4;

/// Centralize every schema of `document`. Applying this to its own output is a
/// no-op.
pub fn dedupe(mut document: OpenRpcDocument) -> Result<OpenRpcDocument, SchemaEncodingError> {
    let OpenRpcDocument {
        methods,
        components,
        ..
    } = &mut document;

    for method in methods.iter_mut() {
        for param in method.params.iter_mut() {
            centralize(&mut param.schema, &mut components.schemas)?;
        }
        centralize(&mut method.result.schema, &mut components.schemas)?;
    }

    Ok(document)
}

fn centralize(
    node: &mut SchemaNode,
    schemas: &mut BTreeMap<String, SchemaNode>,
) -> Result<(), SchemaEncodingError> {
    node.definitions.clear();
    if node.is_reference() {
        return Ok(());
    }

    for property in node.properties.values_mut() {
        centralize(property, schemas)?;
    }
    match &mut node.items {
        Some(SchemaItems::Single(item)) => centralize(item, schemas)?,
        Some(SchemaItems::Tuple(items)) => {
            for item in items.iter_mut() {
                centralize(item, schemas)?;
            }
        }
        None => {}
    }
    for alternative in node.one_of.iter_mut() {
        centralize(alternative, schemas)?;
    }

    let key = content_key(node)?;
    match schemas.get(&key) {
        Some(existing) if *existing != *node => {
            return Err(SchemaEncodingError::KeyCollision { key });
        }
        Some(_) => {}
        None => {
            schemas.insert(key.clone(), node.clone());
        }
    }

    *node = SchemaNode::component(&key);
    Ok(())
}

/// The components-table key for `node`:
/// `[<descriptionToken>_][<type>.][<title>.]<digest>`.
pub fn content_key(node: &SchemaNode) -> Result<String, SchemaEncodingError> {
    let canonical = canonical_json(node)?;
    let digest = Sha256::digest(canonical.as_bytes());

    let mut key = hex::encode(&digest[..DIGEST_PREFIX_LEN]);

    if let Some(title) = node.title.as_deref().filter(|title| !title.is_empty()) {
        key = format!("{title}.{key}");
    }
    if let Some(schema_type) = node.schema_type.as_deref().filter(|t| !t.is_empty()) {
        key = format!("{schema_type}.{key}");
    }
    if let Some(token) = description_token(node.description.as_deref()) {
        key = format!("{token}_{key}");
    }

    Ok(key)
}

/// The text after the last `:` of a description, when it is a single word.
fn description_token(description: Option<&str>) -> Option<&str> {
    let token = description?.rsplit(':').next()?;
    (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token)
}

/// Serialize with object keys sorted at every level.
fn canonical_json(node: &SchemaNode) -> Result<String, SchemaEncodingError> {
    let value = sort_keys(serde_json::to_value(node)?);
    Ok(serde_json::to_string(&value)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openrpc::{ContentDescriptor, InfoObject, MethodObject};
    use crate::reflect::reflect;
    use crate::semantic::{CompositeField, SemanticType};

    fn document_with(params: Vec<SchemaNode>, result: SchemaNode) -> OpenRpcDocument {
        let mut method = MethodObject::new("test_method", ContentDescriptor::new("r", result));
        for (index, schema) in params.into_iter().enumerate() {
            method = method.with_param(ContentDescriptor::new(format!("p{index}"), schema));
        }
        OpenRpcDocument::new(InfoObject::new("Test", "1.0.0")).with_method(method)
    }

    fn is_hex_digest(text: &str) -> bool {
        text.len() == DIGEST_PREFIX_LEN * 2 && text.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_key_format() {
        let key = content_key(&reflect(&SemanticType::Address)).unwrap();
        let digest = key.strip_prefix("string.address.").unwrap();
        assert!(is_hex_digest(digest), "{key}");

        let untitled = content_key(&SchemaNode::boolean()).unwrap();
        assert!(is_hex_digest(untitled.strip_prefix("boolean.").unwrap()));

        let permissive = content_key(&SchemaNode::any()).unwrap();
        assert!(is_hex_digest(&permissive));
    }

    #[test]
    fn test_key_description_token() {
        let tagged = SchemaNode::object().with_description("core/types:Header");
        assert!(content_key(&tagged).unwrap().starts_with("Header_object."));

        let null = SchemaNode::null().with_description("Null");
        assert!(content_key(&null).unwrap().starts_with("Null_null."));

        let prose = SchemaNode::string().with_description("Hex representation of the integer");
        assert!(content_key(&prose).unwrap().starts_with("string."));

        let trailing_colon = SchemaNode::string().with_description("pkg:");
        assert!(content_key(&trailing_colon).unwrap().starts_with("string."));
    }

    #[test]
    fn test_key_ignores_property_order() {
        let a = SchemaNode::object()
            .with_property("a", SchemaNode::string())
            .with_property("b", SchemaNode::integer());
        let b = SchemaNode::object()
            .with_property("b", SchemaNode::integer())
            .with_property("a", SchemaNode::string());

        assert_eq!(content_key(&a).unwrap(), content_key(&b).unwrap());
    }

    #[test]
    fn test_same_type_same_reference() {
        let document = document_with(
            vec![reflect(&SemanticType::Hash), reflect(&SemanticType::Hash)],
            reflect(&SemanticType::Hash),
        );

        let deduped = dedupe(document).unwrap();
        let method = &deduped.methods[0];

        assert_eq!(deduped.components.schemas.len(), 1);
        assert!(method.params[0].schema.is_reference());
        assert_eq!(method.params[0].schema, method.params[1].schema);
        assert_eq!(method.params[0].schema, method.result.schema);

        let key = method.result.schema.component_key().unwrap();
        assert_eq!(deduped.components.schemas[key], reflect(&SemanticType::Hash));
    }

    #[test]
    fn test_children_become_references() {
        let block = SemanticType::composite("Block")
            .with_field(CompositeField::new("hash", SemanticType::Hash))
            .with_field(CompositeField::new("parentHash", SemanticType::Hash))
            .with_field(CompositeField::new(
                "transactions",
                SemanticType::collection(SemanticType::Hash),
            ));

        let deduped = dedupe(document_with(vec![], reflect(&block))).unwrap();
        let schemas = &deduped.components.schemas;

        // hash, array of hash, and the block itself
        assert_eq!(schemas.len(), 3);

        let block_schema = deduped.resolve_ref(&deduped.methods[0].result.schema).unwrap();
        assert_eq!(block_schema.title.as_deref(), Some("Block"));
        assert!(block_schema.properties["hash"].is_reference());
        assert_eq!(
            block_schema.properties["hash"],
            block_schema.properties["parentHash"]
        );

        let transactions = deduped
            .resolve_ref(&block_schema.properties["transactions"])
            .unwrap();
        match &transactions.items {
            Some(SchemaItems::Single(item)) => {
                assert_eq!(**item, block_schema.properties["hash"])
            }
            other => panic!("unexpected items: {other:?}"),
        }
    }

    #[test]
    fn test_one_of_alternatives_are_shared() {
        let deduped = dedupe(document_with(
            vec![
                reflect(&SemanticType::BlockNumberOrHash),
                reflect(&SemanticType::Integer),
            ],
            reflect(&SemanticType::BlockNumberOrTag),
        ))
        .unwrap();

        // integer, hash, tag enum, and the two unions
        assert_eq!(deduped.components.schemas.len(), 5);

        let integer_ref = &deduped.methods[0].params[1].schema;
        let or_hash = deduped
            .resolve_ref(&deduped.methods[0].params[0].schema)
            .unwrap();
        let or_tag = deduped.resolve_ref(&deduped.methods[0].result.schema).unwrap();
        assert_eq!(&or_hash.one_of[1], integer_ref);
        assert_eq!(&or_tag.one_of[0], integer_ref);
    }

    #[test]
    fn test_definitions_are_stripped() {
        let with_definitions = SchemaNode::object()
            .with_title("Receipt")
            .with_definition("Log", SchemaNode::object().with_title("Log"));

        let deduped = dedupe(document_with(vec![with_definitions], SchemaNode::null())).unwrap();
        let receipt = deduped
            .resolve_ref(&deduped.methods[0].params[0].schema)
            .unwrap();

        assert!(receipt.definitions.is_empty());
        assert!(
            !deduped
                .components
                .schemas
                .values()
                .any(|schema| schema.title.as_deref() == Some("Log"))
        );
    }

    #[test]
    fn test_idempotent() {
        let header = SemanticType::composite("Header")
            .with_field(CompositeField::new("number", SemanticType::Integer))
            .with_field(CompositeField::new("miner", SemanticType::Address));
        let document = document_with(
            vec![reflect(&header), reflect(&SemanticType::BlockNumberOrTag)],
            reflect(&SemanticType::collection(header)),
        );

        let once = dedupe(document).unwrap();
        let twice = dedupe(once.clone()).unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            serde_json::to_string(&once).unwrap(),
            serde_json::to_string(&twice).unwrap()
        );
    }

    #[test]
    fn test_collision_is_an_error() {
        let schema = SchemaNode::boolean();
        let key = content_key(&schema).unwrap();

        let mut document = document_with(vec![schema], SchemaNode::null());
        document
            .components
            .schemas
            .insert(key.clone(), SchemaNode::string());

        match dedupe(document) {
            Err(SchemaEncodingError::KeyCollision { key: collided }) => assert_eq!(collided, key),
            other => panic!("expected a collision, got {other:?}"),
        }
    }
}
