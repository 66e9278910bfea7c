// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! OpenRPC description generator.
//!
//! Given a snapshot of a method registry, this crate produces one OpenRPC
//! document listing every method with its documentation, parameter and result
//! schemas, and a deduplicated table of shared schemas.
//!
//! # Example
//!
//! ```
//! use openrpc_describe::{
//!     GeneratorConfig, NoDocumentation, RegisteredMethod, RegistrySnapshot, SemanticType,
//!     ServiceRegistration, assemble,
//! };
//!
//! let snapshot = RegistrySnapshot::new().with_service(
//!     ServiceRegistration::new("eth", "PublicEthereumAPI").with_method(
//!         RegisteredMethod::new("chainId")
//!             .with_result(SemanticType::Integer)
//!             .fallible(),
//!     ),
//! );
//!
//! let document = assemble(&snapshot, &NoDocumentation, &GeneratorConfig::default())?;
//! assert_eq!(document.methods[0].name, "eth_chainId");
//! # Ok::<_, openrpc_describe::DescribeError>(())
//! ```

pub mod assemble;
pub mod builder;
pub mod config;
pub mod dedupe;
pub mod docs;
pub mod env_const;
pub mod error;
pub mod openrpc;
pub mod reflect;
pub mod registry;
pub mod semantic;

// Re-export commonly used types
pub use assemble::{DescribeService, assemble};
pub use config::GeneratorConfig;
pub use docs::{DocumentationMap, DocumentationSource, MethodDocs, NoDocumentation};
pub use error::{DescribeError, RegistrationError, SchemaEncodingError};
pub use openrpc::{OpenRpcDocument, SchemaNode};
pub use registry::{RegisteredMethod, RegistrySnapshot, ServiceRegistration};
pub use semantic::{CompositeField, SemanticType};
