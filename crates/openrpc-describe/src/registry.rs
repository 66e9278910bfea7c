// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A snapshot of the method registry being described.
//!
//! Services are kept in registration order. The same namespace may be
//! registered by more than one service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::semantic::SemanticType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub services: Vec<ServiceRegistration>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: ServiceRegistration) -> Self {
        self.services.push(service);
        self
    }

    pub fn method_count(&self) -> usize {
        self.services.iter().map(|service| service.methods.len()).sum()
    }
}

/// One service (receiver) registered under a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    pub namespace: String,
    /// Name of the type implementing the methods; used for documentation lookup
    pub receiver: String,
    #[serde(default)]
    pub methods: Vec<RegisteredMethod>,
}

impl ServiceRegistration {
    pub fn new(namespace: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            receiver: receiver.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: RegisteredMethod) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredMethod {
    pub name: String,
    /// Declared parameter types, including a leading context argument when
    /// `has_context` is set
    #[serde(default)]
    pub params: Vec<SemanticType>,
    /// Declared parameter identifiers (context argument excluded). Empty entries
    /// are unnamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_names: Option<Vec<String>>,
    /// Declared result types, including a trailing error channel if any
    #[serde(default)]
    pub results: Vec<SemanticType>,
    #[serde(default)]
    pub is_subscription: bool,
    #[serde(default)]
    pub has_context: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

impl RegisteredMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            param_names: None,
            results: Vec::new(),
            is_subscription: false,
            has_context: false,
            source: None,
        }
    }

    /// Add a named parameter.
    pub fn with_param(mut self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        let unnamed_so_far = self.declared_param_count();
        self.param_names
            .get_or_insert_with(|| vec![String::new(); unnamed_so_far])
            .push(name.into());
        self.params.push(semantic_type);
        self
    }

    /// Add a parameter without a declared identifier.
    pub fn with_unnamed_param(mut self, semantic_type: SemanticType) -> Self {
        if let Some(names) = &mut self.param_names {
            names.push(String::new());
        }
        self.params.push(semantic_type);
        self
    }

    pub fn with_result(mut self, semantic_type: SemanticType) -> Self {
        self.results.push(semantic_type);
        self
    }

    /// The method also returns an error channel.
    pub fn fallible(self) -> Self {
        self.with_result(SemanticType::Error)
    }

    /// The method takes an implicit leading context argument.
    pub fn with_context(mut self) -> Self {
        self.has_context = true;
        self.params.insert(0, SemanticType::Context);
        self
    }

    pub fn subscription(mut self) -> Self {
        self.is_subscription = true;
        self
    }

    pub fn with_source(mut self, file: impl Into<String>, line: u32) -> Self {
        self.source = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    /// Number of parameters excluding the implicit context argument.
    pub fn declared_param_count(&self) -> usize {
        let has_leading_context =
            self.has_context && self.params.first() == Some(&SemanticType::Context);
        self.params.len() - usize::from(has_leading_context)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

/// Identifies the declaration that documents a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaringIdentity<'a> {
    pub receiver: &'a str,
    pub method: &'a str,
}

impl<'a> DeclaringIdentity<'a> {
    pub fn new(receiver: &'a str, method: &'a str) -> Self {
        Self { receiver, method }
    }
}

impl fmt::Display for DeclaringIdentity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.receiver, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_builder() {
        let method = RegisteredMethod::new("getBalance")
            .with_context()
            .with_param("address", SemanticType::Address)
            .with_unnamed_param(SemanticType::BlockNumberOrHash)
            .with_result(SemanticType::Integer)
            .fallible();

        assert_eq!(method.params.len(), 3);
        assert_eq!(method.params[0], SemanticType::Context);
        assert_eq!(
            method.param_names,
            Some(vec!["address".to_string(), String::new()])
        );
        assert_eq!(method.results.last(), Some(&SemanticType::Error));
    }

    #[test]
    fn test_named_after_unnamed_pads_names() {
        let method = RegisteredMethod::new("call")
            .with_context()
            .with_unnamed_param(SemanticType::Bytes)
            .with_param("block", SemanticType::BlockNumberOrTag);

        assert_eq!(method.declared_param_count(), 2);
        assert_eq!(
            method.param_names,
            Some(vec![String::new(), "block".to_string()])
        );
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = serde_json::json!({
            "services": [{
                "namespace": "admin",
                "receiver": "PublicAdminAPI",
                "methods": [
                    {"name": "datadir", "results": [{"kind": "string"}]},
                    {"name": "peerEvents", "isSubscription": true, "hasContext": true,
                     "params": [{"kind": "context"}]}
                ]
            }]
        });

        let snapshot: RegistrySnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.method_count(), 2);

        let methods = &snapshot.services[0].methods;
        assert!(methods[1].is_subscription);
        assert!(methods[1].has_context);
        assert_eq!(methods[0].param_names, None);
    }

    #[test]
    fn test_identity_display() {
        let identity = DeclaringIdentity::new("PublicAdminAPI", "datadir");
        assert_eq!(identity.to_string(), "PublicAdminAPI.datadir");
    }
}
