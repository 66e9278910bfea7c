// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Assembles the OpenRPC document for a registry snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use crate::builder::build_method;
use crate::config::GeneratorConfig;
use crate::dedupe::dedupe;
use crate::docs::{DocumentationResolver, DocumentationSource};
use crate::error::DescribeError;
use crate::openrpc::OpenRpcDocument;
use crate::registry::{DeclaringIdentity, RegistrySnapshot};

/// Describe every method in `snapshot`.
///
/// The build either fully succeeds or fails on the first method that cannot be
/// described. Nothing is kept between calls.
pub fn assemble(
    snapshot: &RegistrySnapshot,
    docs: &dyn DocumentationSource,
    config: &GeneratorConfig,
) -> Result<OpenRpcDocument, DescribeError> {
    let resolver = DocumentationResolver::new(docs);
    let mut document = OpenRpcDocument::new(config.info.clone());
    document.external_docs = config.source_docs();
    let mut seen = HashSet::new();

    for service in &snapshot.services {
        if service.namespace == config.reserved_namespace {
            continue;
        }

        for method in &service.methods {
            let qualified_name = config.qualified_name(&service.namespace, &method.name);

            if method.is_subscription || config.is_subscription_name(&qualified_name) {
                tracing::debug!("Skipping subscription method {}", qualified_name);
                continue;
            }

            // First registration wins
            if !seen.insert(qualified_name.clone()) {
                tracing::warn!(
                    "Method {} registered more than once; keeping the first registration, dropping the one from {}",
                    qualified_name,
                    service.receiver
                );
                continue;
            }

            let identity = DeclaringIdentity::new(&service.receiver, &method.name);
            let method_docs = resolver.resolve(&identity);

            let mut method_obj = build_method(&qualified_name, &identity, method, &method_docs)?;
            if !config.include_external_docs {
                method_obj.external_docs = None;
            }

            tracing::debug!(
                "Described {} ({} params)",
                qualified_name,
                method_obj.params.len()
            );
            document.methods.push(method_obj);
        }
    }

    document.methods.sort_by(|a, b| a.name.cmp(&b.name));

    let document = dedupe(document)?;

    tracing::info!(
        methods = document.methods.len(),
        schemas = document.components.schemas.len(),
        "Generated OpenRPC document"
    );

    Ok(document)
}

/// Owns what a service needs to describe itself, and builds a fresh document
/// on every call.
#[derive(Clone)]
pub struct DescribeService {
    snapshot: RegistrySnapshot,
    docs: Arc<dyn DocumentationSource>,
    config: GeneratorConfig,
}

impl DescribeService {
    pub fn new(
        snapshot: RegistrySnapshot,
        docs: Arc<dyn DocumentationSource>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            snapshot,
            docs,
            config,
        }
    }

    pub fn describe(&self) -> Result<OpenRpcDocument, DescribeError> {
        assemble(&self.snapshot, self.docs.as_ref(), &self.config)
    }
}
