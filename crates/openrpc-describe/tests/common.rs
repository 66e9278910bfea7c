// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use openrpc_describe::{
    DocumentationSource, GeneratorConfig, NoDocumentation, OpenRpcDocument, RegistrySnapshot,
    assemble,
};
use serde_json::Value;

pub fn describe(snapshot: &RegistrySnapshot) -> OpenRpcDocument {
    describe_with(snapshot, &NoDocumentation, &GeneratorConfig::default())
}

pub fn describe_with(
    snapshot: &RegistrySnapshot,
    docs: &dyn DocumentationSource,
    config: &GeneratorConfig,
) -> OpenRpcDocument {
    assemble(snapshot, docs, config).unwrap()
}

pub fn assert_document(document: &OpenRpcDocument, expected: Value) {
    let actual = serde_json::to_value(document).unwrap();

    println!(
        "!! expected: {}",
        serde_json::to_string_pretty(&expected).unwrap()
    );
    println!(
        "!! actual: {}",
        serde_json::to_string_pretty(&actual).unwrap()
    );

    assert_eq!(expected, actual)
}

pub fn method_names(document: &OpenRpcDocument) -> Vec<&str> {
    document
        .methods
        .iter()
        .map(|method| method.name.as_str())
        .collect()
}
