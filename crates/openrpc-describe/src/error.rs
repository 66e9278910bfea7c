// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescribeError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    SchemaEncoding(#[from] SchemaEncodingError),
}

/// A method signature that cannot be described. Fatal to the whole build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot describe method `{method}` ({position}): {reason}")]
pub struct RegistrationError {
    pub method: String,
    pub position: Position,
    pub reason: RegistrationErrorReason,
}

impl RegistrationError {
    pub fn new(method: &str, position: Position, reason: RegistrationErrorReason) -> Self {
        Self {
            method: method.to_string(),
            position,
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Parameter(usize),
    Result(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Parameter(index) => write!(f, "parameter {index}"),
            Position::Result(index) => write!(f, "result {index}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationErrorReason {
    #[error("{names} parameter names declared for {types} parameter types")]
    ParameterCountMismatch { names: usize, types: usize },

    #[error("expected a leading context argument")]
    MissingContext,

    #[error("a {kind} value cannot be described by a schema")]
    Unrepresentable { kind: &'static str },
}

/// Failure to canonicalize or key a schema during deduplication. Always an
/// internal invariant violation.
#[derive(Error, Debug)]
pub enum SchemaEncodingError {
    #[error("Unable to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Schema key `{key}` already holds a different schema")]
    KeyCollision { key: String },
}
