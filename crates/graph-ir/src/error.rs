// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for graph construction and mutation.

use crate::LayerId;

/// Errors that can occur when building or rewriting a [`crate::Graph`].
///
/// Every mutator either succeeds with all graph invariants intact or
/// returns one of these with the graph observably unchanged.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The layer handle does not refer to a live layer.
    #[error("layer handle {0:?} is not in the graph")]
    UnknownLayer(LayerId),

    /// A slot index is out of range for the layer's arity.
    #[error("{slot_kind} slot {index} out of range for layer '{layer}'")]
    SlotOutOfRange {
        layer: String,
        slot_kind: &'static str,
        index: usize,
    },

    /// The input slot is already fed by an upstream output.
    #[error("input slot {index} of layer '{layer}' is already connected")]
    AlreadyConnected { layer: String, index: usize },

    /// The input slot has no upstream connection.
    #[error("input slot {index} of layer '{layer}' is not connected")]
    NotConnected { layer: String, index: usize },

    /// Only single-input/single-output layer kinds can be spliced into
    /// an existing edge.
    #[error("cannot splice layer kind '{kind}': insertion requires exactly one input and one output")]
    InvalidInsertion { kind: String },

    /// Replacement requires matching arity and a disconnected replacement.
    #[error("cannot replace '{old}' with '{new}': {detail}")]
    ReplacementMismatch {
        old: String,
        new: String,
        detail: String,
    },

    /// A layer with live consumers cannot be erased.
    #[error("cannot erase layer '{layer}': {consumers} consumer(s) still attached")]
    LayerInUse { layer: String, consumers: usize },

    /// A tensor info that downstream consumers already observed cannot
    /// be replaced.
    #[error("tensor info of output {index} on layer '{layer}' is frozen by downstream consumers")]
    InfoFrozen { layer: String, index: usize },

    /// The requested connection would create a cycle.
    #[error("connecting '{from}' to '{to}' would create a cycle")]
    CycleDetected { from: String, to: String },

    /// The graph failed whole-graph validation.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}
