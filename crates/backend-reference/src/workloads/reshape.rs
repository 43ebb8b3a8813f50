// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference reshape workload.

use backend_core::{QueueDescriptor, Workload, WorkloadError};
use graph_ir::LayerKind;
use tensor_core::{Tensor, TensorView};

/// Relabels a tensor's shape without moving data: a straight byte copy
/// from input to output storage.
///
/// Reshape is dtype-agnostic, so unlike the movement workloads there is
/// one untyped variant covering every element type.
#[derive(Debug)]
pub struct RefReshapeWorkload {
    descriptor: QueueDescriptor,
}

impl RefReshapeWorkload {
    pub const NAME: &'static str = "RefReshapeWorkload";

    /// Validates the descriptor.
    ///
    /// # Errors
    /// [`WorkloadError::InvalidDescriptor`] on wrong arity, an output
    /// shape differing from the target shape, a change in element count
    /// or dtype, or altered quantization parameters.
    pub fn new(descriptor: QueueDescriptor) -> Result<Self, WorkloadError> {
        let LayerKind::Reshape(params) = &descriptor.params else {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "reshape".into(),
                detail: format!("descriptor carries {} parameters", descriptor.params),
            });
        };
        descriptor.validate_arity("reshape", 1, 1)?;

        let input = &descriptor.inputs[0];
        let output = &descriptor.outputs[0];
        if output.shape() != &params.target_shape {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "reshape".into(),
                detail: format!(
                    "output shape {} does not match target shape {}",
                    output.shape(),
                    params.target_shape,
                ),
            });
        }
        if input.num_elements() != output.num_elements() {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "reshape".into(),
                detail: format!(
                    "element count changes from {} to {}",
                    input.num_elements(),
                    output.num_elements(),
                ),
            });
        }
        if input.dtype() != output.dtype() {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "reshape".into(),
                detail: format!(
                    "dtype changes from {} to {}",
                    input.dtype(),
                    output.dtype(),
                ),
            });
        }
        if input.quantization() != output.quantization() {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "reshape".into(),
                detail: "quantization parameters must pass through unchanged".into(),
            });
        }
        Ok(Self { descriptor })
    }
}

impl Workload for RefReshapeWorkload {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(
        &self,
        inputs: &[TensorView<'_>],
        outputs: &mut [Tensor],
    ) -> Result<(), WorkloadError> {
        self.descriptor.validate_binding("reshape", inputs, outputs)?;
        outputs[0]
            .as_bytes_mut()
            .copy_from_slice(inputs[0].as_bytes());
        Ok(())
    }
}
