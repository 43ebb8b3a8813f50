// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-ir
//!
//! A slot-connected intermediate representation for tensor computation
//! graphs, built for in-place rewriting:
//!
//! - [`LayerKind`] — the closed set of operations, each carrying its own
//!   parameter payload.
//! - [`Layer`] — a node with kind-fixed input/output slot arity.
//! - [`InputSlotRef`] / [`OutputSlotRef`] — value handles naming one
//!   connection point; the only ownership edge is Layer → slots.
//! - [`Graph`] — an arena of layers with stable [`LayerId`] handles, a
//!   materialized topological order, connectivity-preserving mutators
//!   (`insert_new_layer`, `replace_layer`, `erase_layer`), and the
//!   related-layers provenance table maintained across rewrites.
//!
//! An external parser populates a `Graph` and resolves every output
//! slot's [`tensor_core::TensorInfo`]; the optimizer then rewrites the
//! graph in place, and the backends lower each layer read-only.

mod error;
mod graph;
mod layer;

pub use error::GraphError;
pub use graph::Graph;
pub use layer::{
    InputSlot, InputSlotRef, Layer, LayerId, LayerKind, OutputSlot, OutputSlotRef,
    PermuteDescriptor, ReshapeDescriptor, TransposeDescriptor,
};
