// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Semantic types describe the shape of a value as the wire sees it, independent
//! of how the implementation stores it. They are captured when a method is
//! registered, so the generator never has to inspect a live callback.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SemanticType {
    /// Arbitrary-precision integer, hex encoded on the wire
    Integer,
    /// 256-bit hash
    Hash,
    /// 160-bit account address
    Address,
    /// Variable-length byte string
    Bytes,
    /// Hex data of at most one 256-bit word
    DataWord,
    BlockNonce,
    /// A block number or one of the `earliest`/`latest`/`pending` tags
    BlockNumberOrTag,
    /// A block number or a block hash
    BlockNumberOrHash,

    Int,
    Uint,
    Float,
    Bool,
    String,
    /// Any JSON value
    Any,

    /// An object with named fields
    Composite {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        fields: Vec<CompositeField>,
    },
    /// A homogeneous list
    Collection { element: Box<SemanticType> },
    /// A value that may be absent (a pointer, in most host languages)
    Optional { inner: Box<SemanticType> },

    /// Implicit cancellation/context argument supplied by the transport
    Context,
    /// Error channel of a method's return
    Error,
    Function,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeField {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompositeField {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SemanticType {
    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Add a field to a composite. Other kinds are returned unchanged.
    pub fn with_field(mut self, field: CompositeField) -> Self {
        if let Self::Composite { fields, .. } = &mut self {
            fields.push(field);
        }
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        if let Self::Composite { description, .. } = &mut self {
            *description = Some(text.into());
        }
        self
    }

    pub fn collection(element: SemanticType) -> Self {
        Self::Collection {
            element: Box::new(element),
        }
    }

    pub fn optional(inner: SemanticType) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// Wrap this type to make it optional (if not already)
    pub fn into_optional(self) -> Self {
        match self {
            Self::Optional { .. } => self,
            _ => Self::optional(self),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }

    /// The type with every `Optional` layer peeled off. A value and a pointer to
    /// it share one wire encoding.
    pub fn without_optional(&self) -> &SemanticType {
        match self {
            Self::Optional { inner } => inner.without_optional(),
            _ => self,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Hash => "hash",
            Self::Address => "address",
            Self::Bytes => "bytes",
            Self::DataWord => "dataWord",
            Self::BlockNonce => "blockNonce",
            Self::BlockNumberOrTag => "blockNumberOrTag",
            Self::BlockNumberOrHash => "blockNumberOrHash",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Any => "any",
            Self::Composite { .. } => "composite",
            Self::Collection { .. } => "collection",
            Self::Optional { .. } => "optional",
            Self::Context => "context",
            Self::Error => "error",
            Self::Function => "function",
            Self::Channel => "channel",
        }
    }

    /// The first kind in this type (searching nested fields and elements) that
    /// has no JSON representation.
    pub fn unrepresentable_kind(&self) -> Option<&'static str> {
        match self {
            Self::Context | Self::Error | Self::Function | Self::Channel => Some(self.kind_name()),
            Self::Composite { fields, .. } => fields
                .iter()
                .find_map(|field| field.semantic_type.unrepresentable_kind()),
            Self::Collection { element } => element.unrepresentable_kind(),
            Self::Optional { inner } => inner.unrepresentable_kind(),
            _ => None,
        }
    }
}
