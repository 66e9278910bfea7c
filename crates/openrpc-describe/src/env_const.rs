// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub const OPENRPC_METHOD_SEPARATOR: &str = "OPENRPC_METHOD_SEPARATOR";
pub const OPENRPC_SUBSCRIBE_SUFFIX: &str = "OPENRPC_SUBSCRIBE_SUFFIX";
pub const OPENRPC_RESERVED_NAMESPACE: &str = "OPENRPC_RESERVED_NAMESPACE";

pub const OPENRPC_INFO_TITLE: &str = "OPENRPC_INFO_TITLE";
pub const OPENRPC_INFO_VERSION: &str = "OPENRPC_INFO_VERSION";
pub const OPENRPC_INFO_DESCRIPTION: &str = "OPENRPC_INFO_DESCRIPTION";
pub const OPENRPC_INFO_TERMS_OF_SERVICE: &str = "OPENRPC_INFO_TERMS_OF_SERVICE";
pub const OPENRPC_SOURCE_URL: &str = "OPENRPC_SOURCE_URL";

pub const OPENRPC_INCLUDE_EXTERNAL_DOCS: &str = "OPENRPC_INCLUDE_EXTERNAL_DOCS";
