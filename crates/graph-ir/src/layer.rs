// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer nodes and their connection slots.
//!
//! A [`Layer`] is one node of the computation graph: an operation kind
//! with a fixed slot arity and kind-specific parameters. Connectivity is
//! expressed through slots: an [`OutputSlot`] carries the producer-side
//! tensor descriptor and fans out to consumers, an [`InputSlot`] refers
//! to exactly one upstream output. Slots are owned by their layer; the
//! consumer lists hold non-owning [`InputSlotRef`] handles, so there are
//! no ownership cycles between producers and consumers.

use tensor_core::{Permutation, Shape, TensorInfo};

/// Stable handle to a layer in a [`crate::Graph`] arena.
///
/// Handles survive insertions, replacements, and erasures of *other*
/// layers; a handle to a removed layer simply stops resolving.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub(crate) usize);

impl LayerId {
    /// Returns the raw arena index (for display purposes).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to one input slot: `(layer, input index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputSlotRef {
    pub layer: LayerId,
    pub index: usize,
}

impl InputSlotRef {
    pub fn new(layer: LayerId, index: usize) -> Self {
        Self { layer, index }
    }
}

/// Handle to one output slot: `(layer, output index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputSlotRef {
    pub layer: LayerId,
    pub index: usize,
}

impl OutputSlotRef {
    pub fn new(layer: LayerId, index: usize) -> Self {
        Self { layer, index }
    }
}

/// Parameters for a Transpose layer.
///
/// Gather convention: output dimension `i` is taken from input dimension
/// `permutation[i]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransposeDescriptor {
    pub permutation: Permutation,
}

/// Parameters for a Permute layer.
///
/// Scatter convention: input dimension `i` is sent to output dimension
/// `permutation[i]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PermuteDescriptor {
    pub permutation: Permutation,
}

/// Parameters for a Reshape layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReshapeDescriptor {
    pub target_shape: Shape,
}

/// The operation a layer performs, with its kind-specific parameters.
///
/// A closed tagged variant: backends and the optimizer dispatch on it
/// with exhaustive matches, so adding an operation is a compile-time
/// checklist rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// A network input binding point.
    Input,
    /// A network output binding point.
    Output,
    /// Dimension reordering, gather convention.
    Transpose(TransposeDescriptor),
    /// Dimension reordering, scatter convention.
    Permute(PermuteDescriptor),
    /// Shape relabeling without data movement.
    Reshape(ReshapeDescriptor),
}

impl LayerKind {
    /// Returns the fixed `(inputs, outputs)` arity of this kind.
    pub fn arity(&self) -> (usize, usize) {
        match self {
            LayerKind::Input => (0, 1),
            LayerKind::Output => (1, 0),
            LayerKind::Transpose(_) | LayerKind::Permute(_) | LayerKind::Reshape(_) => (1, 1),
        }
    }

    /// Returns `true` for kinds that lower to a workload (everything
    /// except the Input/Output binding points).
    pub fn is_compute(&self) -> bool {
        !matches!(self, LayerKind::Input | LayerKind::Output)
    }

    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Input => "input",
            LayerKind::Output => "output",
            LayerKind::Transpose(_) => "transpose",
            LayerKind::Permute(_) => "permute",
            LayerKind::Reshape(_) => "reshape",
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input connection point on a layer.
///
/// Unconnected is a transient state during construction; validation
/// rejects it before lowering.
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    pub(crate) source: Option<OutputSlotRef>,
}

impl InputSlot {
    /// Returns the upstream output feeding this slot, if connected.
    pub fn source(&self) -> Option<OutputSlotRef> {
        self.source
    }
}

/// One output connection point on a layer.
#[derive(Debug, Clone, Default)]
pub struct OutputSlot {
    pub(crate) info: Option<TensorInfo>,
    pub(crate) consumers: Vec<InputSlotRef>,
}

impl OutputSlot {
    /// Returns the resolved tensor descriptor, if set.
    pub fn info(&self) -> Option<&TensorInfo> {
        self.info.as_ref()
    }

    /// Returns the input slots this output feeds.
    pub fn consumers(&self) -> &[InputSlotRef] {
        &self.consumers
    }
}

/// A node in the computation graph.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) name: String,
    pub(crate) kind: LayerKind,
    pub(crate) inputs: Vec<InputSlot>,
    pub(crate) outputs: Vec<OutputSlot>,
}

impl Layer {
    pub(crate) fn new(kind: LayerKind, name: &str) -> Self {
        let (num_in, num_out) = kind.arity();
        Self {
            name: name.to_string(),
            kind,
            inputs: vec![InputSlot::default(); num_in],
            outputs: vec![OutputSlot::default(); num_out],
        }
    }

    /// Returns the layer's debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the operation kind and parameters.
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Returns the number of input slots.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of output slots.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns an input slot by index.
    pub fn input(&self, index: usize) -> Option<&InputSlot> {
        self.inputs.get(index)
    }

    /// Returns an output slot by index.
    pub fn output(&self, index: usize) -> Option<&OutputSlot> {
        self.outputs.get(index)
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        let info = self
            .outputs
            .first()
            .and_then(|o| o.info.as_ref())
            .map(|i| format!(" -> {i}"))
            .unwrap_or_default();
        format!("{} ({}){}", self.name, self.kind, info)
    }
}
