// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Human documentation for registered methods.
//!
//! Documentation is a quality concern, not a correctness one: every lookup
//! failure is downgraded to blank text.

use std::collections::HashMap;
use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::DeclaringIdentity;

/// Documentation for one method. `fields` holds the summary of individual
/// parameters/results and `descriptions` their longer trailing comment, both
/// keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDocs {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    #[serde(default)]
    pub descriptions: IndexMap<String, String>,
}

impl MethodDocs {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }

    pub fn with_field_description(
        mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.descriptions.insert(name.into(), text.into());
        self
    }

    /// Trimmed summary, or `None` if blank.
    pub fn summary(&self) -> Option<&str> {
        non_blank(&self.summary)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|text| non_blank(text))
    }

    pub fn field_description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).and_then(|text| non_blank(text))
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Error, Debug)]
pub enum DocumentationLookupError {
    #[error("No documentation for {0}")]
    NotFound(String),

    #[error("Documentation source unavailable: {0}")]
    Unavailable(String),
}

pub trait DocumentationSource: Send + Sync {
    fn lookup(
        &self,
        identity: &DeclaringIdentity<'_>,
    ) -> Result<MethodDocs, DocumentationLookupError>;
}

/// Resolves documentation without ever failing.
pub struct DocumentationResolver<'a> {
    source: &'a dyn DocumentationSource,
}

impl<'a> DocumentationResolver<'a> {
    pub fn new(source: &'a dyn DocumentationSource) -> Self {
        Self { source }
    }

    pub fn resolve(&self, identity: &DeclaringIdentity<'_>) -> MethodDocs {
        match self.source.lookup(identity) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::debug!("Using blank documentation for {}: {}", identity, e);
                MethodDocs::default()
            }
        }
    }
}

/// A source with no documentation at all.
pub struct NoDocumentation;

impl DocumentationSource for NoDocumentation {
    fn lookup(
        &self,
        identity: &DeclaringIdentity<'_>,
    ) -> Result<MethodDocs, DocumentationLookupError> {
        Err(DocumentationLookupError::NotFound(identity.to_string()))
    }
}

/// Sidecar documentation keyed by `Receiver.method`.
///
/// ```json
/// {
///   "PublicBlockChainAPI.getBalance": {
///     "summary": "Returns the balance of an account",
///     "fields": { "address": "Account to query" },
///     "descriptions": { "address": "20 byte hex address" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentationMap {
    entries: HashMap<String, MethodDocs>,
}

impl DocumentationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn insert(&mut self, receiver: &str, method: &str, docs: MethodDocs) {
        self.entries
            .insert(DeclaringIdentity::new(receiver, method).to_string(), docs);
    }

    pub fn with_entry(mut self, receiver: &str, method: &str, docs: MethodDocs) -> Self {
        self.insert(receiver, method, docs);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocumentationSource for DocumentationMap {
    fn lookup(
        &self,
        identity: &DeclaringIdentity<'_>,
    ) -> Result<MethodDocs, DocumentationLookupError> {
        let key = identity.to_string();
        self.entries
            .get(&key)
            .cloned()
            .ok_or(DocumentationLookupError::NotFound(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct BrokenSource;

    impl DocumentationSource for BrokenSource {
        fn lookup(
            &self,
            _identity: &DeclaringIdentity<'_>,
        ) -> Result<MethodDocs, DocumentationLookupError> {
            Err(DocumentationLookupError::Unavailable(
                "declaration file missing".to_string(),
            ))
        }
    }

    #[test]
    fn test_map_lookup() {
        let docs = DocumentationMap::new().with_entry(
            "PublicNetAPI",
            "version",
            MethodDocs::new("Returns the network identifier").with_field("id", "  "),
        );

        let resolver = DocumentationResolver::new(&docs);
        let resolved = resolver.resolve(&DeclaringIdentity::new("PublicNetAPI", "version"));

        assert_eq!(resolved.summary(), Some("Returns the network identifier"));
        assert_eq!(resolved.field("id"), None);
    }

    #[test]
    fn test_missing_entry_is_blank() {
        let docs = DocumentationMap::new();
        let resolver = DocumentationResolver::new(&docs);

        let resolved = resolver.resolve(&DeclaringIdentity::new("PublicNetAPI", "listening"));
        assert_eq!(resolved, MethodDocs::default());
        assert_eq!(resolved.summary(), None);
    }

    #[test]
    fn test_failing_source_is_downgraded() {
        let resolver = DocumentationResolver::new(&BrokenSource);
        let resolved = resolver.resolve(&DeclaringIdentity::new("PrivateAdminAPI", "addPeer"));
        assert_eq!(resolved, MethodDocs::default());

        let resolver = DocumentationResolver::new(&NoDocumentation);
        let resolved = resolver.resolve(&DeclaringIdentity::new("PrivateAdminAPI", "addPeer"));
        assert_eq!(resolved, MethodDocs::default());
    }

    #[test]
    fn test_sidecar_file_format() {
        let json = r#"{
            "PublicBlockChainAPI.getBalance": {
                "summary": "Returns the balance of an account\n",
                "fields": {"address": "Account to query"},
                "descriptions": {"address": "20 byte hex address\n"}
            },
            "PublicBlockChainAPI.blockNumber": {}
        }"#;

        let docs = DocumentationMap::from_reader(json.as_bytes()).unwrap();
        assert_eq!(docs.len(), 2);

        let balance = docs
            .lookup(&DeclaringIdentity::new("PublicBlockChainAPI", "getBalance"))
            .unwrap();
        assert_eq!(balance.summary(), Some("Returns the balance of an account"));
        assert_eq!(balance.field("address"), Some("Account to query"));
        assert_eq!(balance.field_description("address"), Some("20 byte hex address"));
        assert_eq!(balance.description(), None);

        let block_number = docs
            .lookup(&DeclaringIdentity::new("PublicBlockChainAPI", "blockNumber"))
            .unwrap();
        assert_eq!(block_number, MethodDocs::default());
    }
}
