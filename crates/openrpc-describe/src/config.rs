// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use describe_env::{EnvError, Environment};

use crate::env_const::{
    OPENRPC_INCLUDE_EXTERNAL_DOCS, OPENRPC_INFO_DESCRIPTION, OPENRPC_INFO_TERMS_OF_SERVICE,
    OPENRPC_INFO_TITLE, OPENRPC_INFO_VERSION, OPENRPC_METHOD_SEPARATOR,
    OPENRPC_RESERVED_NAMESPACE, OPENRPC_SOURCE_URL, OPENRPC_SUBSCRIBE_SUFFIX,
};
use crate::openrpc::{ExternalDocs, InfoObject};

pub const DEFAULT_METHOD_SEPARATOR: &str = "_";
pub const DEFAULT_SUBSCRIBE_SUFFIX: &str = "_subscribe";
/// Namespace of the transport's own built-in methods, never described.
pub const DEFAULT_RESERVED_NAMESPACE: &str = "rpc";

const DEFAULT_TITLE: &str = "Ethereum JSON-RPC";
const DEFAULT_DESCRIPTION: &str =
    "This API lets you interact with an EVM-based client via JSON-RPC";
const DEFAULT_VERSION: &str = "1.0.10";
const DEFAULT_TERMS_OF_SERVICE: &str = "https://github.com/etclabscore/core-geth/blob/master/COPYING";
const DEFAULT_SOURCE_URL: &str = "https://github.com/etclabscore/core-geth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Joins namespace and method name into the qualified name
    pub method_separator: String,
    /// Methods whose qualified name contains this are push-style and skipped
    pub subscribe_suffix: String,
    pub reserved_namespace: String,
    pub info: InfoObject,
    /// Document-level link to the described server's source; blank disables it
    pub source_url: Option<String>,
    /// Link each method to the source location it was registered from
    pub include_external_docs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            method_separator: DEFAULT_METHOD_SEPARATOR.to_string(),
            subscribe_suffix: DEFAULT_SUBSCRIBE_SUFFIX.to_string(),
            reserved_namespace: DEFAULT_RESERVED_NAMESPACE.to_string(),
            info: default_info(DEFAULT_TITLE, DEFAULT_VERSION, DEFAULT_DESCRIPTION)
                .with_terms_of_service(DEFAULT_TERMS_OF_SERVICE),
            source_url: Some(DEFAULT_SOURCE_URL.to_string()),
            include_external_docs: true,
        }
    }
}

fn default_info(title: &str, version: &str, description: &str) -> InfoObject {
    InfoObject::new(title, version)
        .with_description(description)
        .with_license("Apache-2.0", "https://www.apache.org/licenses/LICENSE-2.0.html")
}

impl GeneratorConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        let title = env.get_non_empty(OPENRPC_INFO_TITLE, DEFAULT_TITLE)?;
        let version = env.get_non_empty(OPENRPC_INFO_VERSION, DEFAULT_VERSION)?;
        let description = env.get_or(OPENRPC_INFO_DESCRIPTION, DEFAULT_DESCRIPTION);

        let mut info = default_info(&title, &version, &description);
        if let Some(terms) = non_blank(env, OPENRPC_INFO_TERMS_OF_SERVICE, DEFAULT_TERMS_OF_SERVICE)
        {
            info = info.with_terms_of_service(terms);
        }

        Ok(Self {
            method_separator: env
                .get_non_empty(OPENRPC_METHOD_SEPARATOR, DEFAULT_METHOD_SEPARATOR)?,
            subscribe_suffix: env
                .get_non_empty(OPENRPC_SUBSCRIBE_SUFFIX, DEFAULT_SUBSCRIBE_SUFFIX)?,
            reserved_namespace: env.get_or(OPENRPC_RESERVED_NAMESPACE, DEFAULT_RESERVED_NAMESPACE),
            info,
            source_url: non_blank(env, OPENRPC_SOURCE_URL, DEFAULT_SOURCE_URL),
            include_external_docs: env.flag(OPENRPC_INCLUDE_EXTERNAL_DOCS, true)?,
        })
    }

    pub fn qualified_name(&self, namespace: &str, method: &str) -> String {
        format!("{namespace}{}{method}", self.method_separator)
    }

    pub fn is_subscription_name(&self, qualified_name: &str) -> bool {
        !self.subscribe_suffix.is_empty() && qualified_name.contains(&self.subscribe_suffix)
    }

    pub fn source_docs(&self) -> Option<ExternalDocs> {
        self.source_url.as_ref().map(|url| ExternalDocs {
            description: "Source".to_string(),
            url: url.clone(),
        })
    }
}

/// An optional setting: unset falls back to the default, blank turns it off.
fn non_blank(env: &dyn Environment, key: &str, default_value: &str) -> Option<String> {
    let value = env.get_or(key, default_value);
    (!value.trim().is_empty()).then_some(value)
}
