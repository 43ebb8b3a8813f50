// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Queue descriptors: the lowering-time binding of a layer's resolved
//! slot metadata and parameters.
//!
//! A [`QueueDescriptor`] is ephemeral and execution-scoped: it is built
//! fresh from a layer when the layer is lowered, copied by value into
//! the workload, and may be discarded and rebuilt across lowerings.
//! Concrete element storage is bound per `execute` call, so a workload
//! instance carries only immutable parameters and can serve concurrent
//! executions.

use crate::WorkloadError;
use graph_ir::{Graph, InputSlotRef, LayerId, LayerKind};
use tensor_core::{DType, Tensor, TensorInfo, TensorView};

/// Captures one layer's parameters and resolved input/output tensor
/// descriptors for workload construction.
#[derive(Debug, Clone)]
pub struct QueueDescriptor {
    /// Debug name of the lowered layer.
    pub layer_name: String,
    /// The operation kind and its parameters.
    pub params: LayerKind,
    /// Resolved descriptors of the tensors feeding each input slot.
    pub inputs: Vec<TensorInfo>,
    /// Resolved descriptors of each output slot.
    pub outputs: Vec<TensorInfo>,
}

impl QueueDescriptor {
    /// Captures `layer`'s parameters and slot descriptors from the graph.
    ///
    /// # Errors
    /// [`WorkloadError::UnresolvedLayer`] if the layer is gone, an input
    /// is unconnected, or any involved tensor info is still unset.
    pub fn from_layer(graph: &Graph, id: LayerId) -> Result<Self, WorkloadError> {
        let layer = graph.layer(id).ok_or_else(|| WorkloadError::UnresolvedLayer {
            layer: format!("#{}", id.index()),
            detail: "layer is no longer in the graph".into(),
        })?;
        let layer_name = layer.name().to_string();

        let mut inputs = Vec::with_capacity(layer.num_inputs());
        for index in 0..layer.num_inputs() {
            let source = graph
                .source_of(InputSlotRef::new(id, index))
                .ok_or_else(|| WorkloadError::UnresolvedLayer {
                    layer: layer_name.clone(),
                    detail: format!("input slot {index} is not connected"),
                })?;
            let info = graph
                .output_info(source)
                .ok_or_else(|| WorkloadError::UnresolvedLayer {
                    layer: layer_name.clone(),
                    detail: format!("input slot {index} has no resolved tensor info"),
                })?;
            inputs.push(info.clone());
        }

        let mut outputs = Vec::with_capacity(layer.num_outputs());
        for index in 0..layer.num_outputs() {
            let info = layer
                .output(index)
                .and_then(|slot| slot.info())
                .ok_or_else(|| WorkloadError::UnresolvedLayer {
                    layer: layer_name.clone(),
                    detail: format!("output slot {index} has no resolved tensor info"),
                })?;
            outputs.push(info.clone());
        }

        Ok(Self {
            layer_name,
            params: layer.kind().clone(),
            inputs,
            outputs,
        })
    }

    /// Checks the fixed slot arity of `operation`.
    ///
    /// # Errors
    /// [`WorkloadError::InvalidDescriptor`] on any count mismatch.
    pub fn validate_arity(
        &self,
        operation: &str,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<(), WorkloadError> {
        if self.inputs.len() != num_inputs || self.outputs.len() != num_outputs {
            return Err(WorkloadError::InvalidDescriptor {
                operation: operation.to_string(),
                detail: format!(
                    "expected {num_inputs} input(s)/{num_outputs} output(s), got {}/{}",
                    self.inputs.len(),
                    self.outputs.len(),
                ),
            });
        }
        Ok(())
    }

    /// Returns the dtype the workload will be specialized for: the dtype
    /// of the first input (the factories' dispatch key).
    ///
    /// # Errors
    /// [`WorkloadError::InvalidDescriptor`] if the descriptor has no inputs.
    pub fn dtype(&self) -> Result<DType, WorkloadError> {
        self.inputs
            .first()
            .map(|info| info.dtype())
            .ok_or_else(|| WorkloadError::InvalidDescriptor {
                operation: self.params.as_str().to_string(),
                detail: "descriptor has no inputs to derive a dtype from".into(),
            })
    }

    /// Validates storage bound at execution time against the captured
    /// descriptors: slot counts and per-slot shape/dtype equality.
    ///
    /// # Errors
    /// [`WorkloadError::BindingMismatch`] on any disagreement.
    pub fn validate_binding(
        &self,
        operation: &str,
        inputs: &[TensorView<'_>],
        outputs: &[Tensor],
    ) -> Result<(), WorkloadError> {
        if inputs.len() != self.inputs.len() || outputs.len() != self.outputs.len() {
            return Err(WorkloadError::BindingMismatch {
                operation: operation.to_string(),
                detail: format!(
                    "bound {}/{} tensors, descriptor expects {}/{}",
                    inputs.len(),
                    outputs.len(),
                    self.inputs.len(),
                    self.outputs.len(),
                ),
            });
        }
        for (index, (view, expected)) in inputs.iter().zip(&self.inputs).enumerate() {
            if view.info().shape() != expected.shape() || view.info().dtype() != expected.dtype() {
                return Err(WorkloadError::BindingMismatch {
                    operation: operation.to_string(),
                    detail: format!(
                        "input {index} bound as {}, descriptor expects {expected}",
                        view.info(),
                    ),
                });
            }
        }
        for (index, (tensor, expected)) in outputs.iter().zip(&self.outputs).enumerate() {
            if tensor.info().shape() != expected.shape()
                || tensor.info().dtype() != expected.dtype()
            {
                return Err(WorkloadError::BindingMismatch {
                    operation: operation.to_string(),
                    detail: format!(
                        "output {index} bound as {}, descriptor expects {expected}",
                        tensor.info(),
                    ),
                });
            }
        }
        Ok(())
    }
}
