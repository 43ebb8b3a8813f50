// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the network pipeline.

/// Errors that can occur while compiling or executing a network.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A graph mutation or validation failed.
    #[error("graph error: {0}")]
    Graph(#[from] graph_ir::GraphError),

    /// Backend assignment failed.
    #[error("planner error: {0}")]
    Planner(#[from] backend_planner::PlannerError),

    /// Workload creation or execution failed.
    #[error("workload error: {0}")]
    Workload(#[from] backend_core::WorkloadError),

    /// A tensor bound as a network input does not match the graph's
    /// Input layer descriptor.
    #[error("input {index} mismatch: expected {expected}, got {actual}")]
    InputMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// The number of bound input tensors does not match the network.
    #[error("network expects {expected} input(s), got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
