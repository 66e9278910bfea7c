// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Builds one OpenRPC method from registry metadata, documentation and
//! reflected schemas.

use crate::docs::MethodDocs;
use crate::error::{Position, RegistrationError, RegistrationErrorReason};
use crate::openrpc::{ContentDescriptor, ExternalDocs, MethodObject, SchemaNode};
use crate::reflect::reflect;
use crate::registry::{DeclaringIdentity, RegisteredMethod};
use crate::semantic::SemanticType;

pub const NULL_RESULT_NAME: &str = "null";

/// Build the method descriptor for `method`, registered as `qualified_name`.
///
/// Fails rather than guessing when the declared parameter names do not line up
/// with the parameter types, or when any parameter/result has no JSON
/// representation.
pub fn build_method(
    qualified_name: &str,
    identity: &DeclaringIdentity<'_>,
    method: &RegisteredMethod,
    docs: &MethodDocs,
) -> Result<MethodObject, RegistrationError> {
    let params = declared_params(qualified_name, method)?;
    let results = declared_results(method);

    if let Some(names) = &method.param_names
        && names.len() != params.len()
    {
        return Err(RegistrationError::new(
            qualified_name,
            Position::Parameter(names.len().min(params.len())),
            RegistrationErrorReason::ParameterCountMismatch {
                names: names.len(),
                types: params.len(),
            },
        ));
    }

    for (index, semantic_type) in params.iter().enumerate() {
        ensure_representable(qualified_name, Position::Parameter(index), semantic_type)?;
    }
    for (index, semantic_type) in results.iter().enumerate() {
        ensure_representable(qualified_name, Position::Result(index), semantic_type)?;
    }

    let result = build_result(qualified_name, results, docs);
    let mut method_obj = MethodObject::new(qualified_name, result);

    if let Some(summary) = docs.summary() {
        method_obj = method_obj.with_summary(summary);
    }
    if let Some(description) = docs.description() {
        method_obj = method_obj.with_description(description);
    }

    for (index, semantic_type) in params.iter().enumerate() {
        let declared_name = method
            .param_names
            .as_ref()
            .and_then(|names| names.get(index))
            .filter(|name| !name.is_empty());
        let name = match declared_name {
            Some(name) => name.clone(),
            None => format!("{qualified_name}Parameter{index}"),
        };

        method_obj = method_obj.with_param(build_param(name, semantic_type, docs));
    }

    if let Some(source) = &method.source {
        method_obj = method_obj.with_external_docs(ExternalDocs {
            description: identity.to_string(),
            url: format!("file://{}:{}", source.file, source.line),
        });
    }

    Ok(method_obj)
}

/// Parameter types with the implicit leading context argument removed.
fn declared_params<'m>(
    qualified_name: &str,
    method: &'m RegisteredMethod,
) -> Result<&'m [SemanticType], RegistrationError> {
    if !method.has_context {
        return Ok(method.params.as_slice());
    }

    match method.params.split_first() {
        Some((SemanticType::Context, rest)) => Ok(rest),
        _ => Err(RegistrationError::new(
            qualified_name,
            Position::Parameter(0),
            RegistrationErrorReason::MissingContext,
        )),
    }
}

/// Result types with a trailing error channel removed. The error channel is
/// reported by the transport, not through a schema.
fn declared_results(method: &RegisteredMethod) -> &[SemanticType] {
    match method.results.split_last() {
        Some((SemanticType::Error, rest)) => rest,
        _ => method.results.as_slice(),
    }
}

fn ensure_representable(
    qualified_name: &str,
    position: Position,
    semantic_type: &SemanticType,
) -> Result<(), RegistrationError> {
    match semantic_type.unrepresentable_kind() {
        Some(kind) => Err(RegistrationError::new(
            qualified_name,
            position,
            RegistrationErrorReason::Unrepresentable { kind },
        )),
        None => Ok(()),
    }
}

fn build_param(name: String, semantic_type: &SemanticType, docs: &MethodDocs) -> ContentDescriptor {
    let descriptor = with_field_docs(ContentDescriptor::new(name, reflect(semantic_type)), docs);

    if semantic_type.is_optional() {
        descriptor.optional()
    } else {
        descriptor.required()
    }
}

fn build_result(qualified_name: &str, results: &[SemanticType], docs: &MethodDocs) -> ContentDescriptor {
    let name = format!("{qualified_name}Result");

    let schema = match results {
        [] => {
            return ContentDescriptor::new(
                NULL_RESULT_NAME,
                SchemaNode::null().with_description("Null"),
            );
        }
        [single] => reflect(single),
        // JSON-RPC carries exactly one result value, so several declared
        // results travel as a positional tuple. Items stay exactly as
        // reflected so they share components with the same type elsewhere.
        many => SchemaNode::tuple(many.iter().map(reflect).collect()),
    };

    with_field_docs(ContentDescriptor::new(name, schema), docs)
}

fn with_field_docs(mut descriptor: ContentDescriptor, docs: &MethodDocs) -> ContentDescriptor {
    if let Some(summary) = docs.field(&descriptor.name) {
        descriptor = descriptor.with_summary(summary);
    }
    if let Some(description) = docs.field_description(&descriptor.name) {
        descriptor = descriptor.with_description(description);
    }
    descriptor
}
