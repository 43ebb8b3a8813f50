// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for backend assignment.

use backend_core::BackendId;

/// Errors that can occur while assigning layers to backends.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The graph contains no layers to assign.
    #[error("graph contains no layers to assign")]
    EmptyGraph,

    /// No registered backend supports a layer.
    #[error("no registered backend supports layer '{layer}' ({operation})")]
    NoBackend { layer: String, operation: String },

    /// The requested backend is not among the registered factories.
    #[error("backend '{backend}' is not registered")]
    UnknownBackend { backend: BackendId },

    /// A strategy produced an inconsistent plan.
    #[error("strategy '{strategy}' failed: {detail}")]
    StrategyFailed { strategy: String, detail: String },

    /// Capturing a layer into a descriptor failed.
    #[error("workload error: {0}")]
    Workload(#[from] backend_core::WorkloadError),
}
