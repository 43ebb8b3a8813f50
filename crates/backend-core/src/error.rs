// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for workload creation and execution.

use crate::BackendId;
use tensor_core::DType;

/// Errors that can occur when lowering a layer to a workload or
/// executing one.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    /// No workload is registered for this (operation, backend, dtype)
    /// combination. A build/deployment mismatch, not a transient
    /// condition — the caller must not retry.
    #[error("backend '{backend}' has no {operation} workload for dtype {dtype}")]
    Unsupported {
        backend: BackendId,
        operation: String,
        dtype: DType,
    },

    /// The queue descriptor violates the operation's parameter or arity
    /// requirements. Rejected at creation time, before any execution.
    #[error("invalid {operation} descriptor: {detail}")]
    InvalidDescriptor { operation: String, detail: String },

    /// The layer could not be captured into a descriptor (unconnected
    /// slot or unresolved tensor info).
    #[error("cannot lower layer '{layer}': {detail}")]
    UnresolvedLayer { layer: String, detail: String },

    /// The storage bound at execution time does not match the
    /// descriptor's tensor infos.
    #[error("{operation} binding mismatch: {detail}")]
    BindingMismatch { operation: String, detail: String },

    /// A tensor descriptor operation failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),
}
