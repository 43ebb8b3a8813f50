// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference CPU workloads.
//!
//! Portable, dependency-free kernels that define the semantics other
//! backends must match. Each workload validates its descriptor fully at
//! construction; `execute` only re-checks the bound storage.

mod permute;
mod reindex;
mod reshape;
mod transpose;

pub use permute::RefPermuteWorkload;
pub use reshape::RefReshapeWorkload;
pub use transpose::RefTransposeWorkload;

use backend_core::{QueueDescriptor, WorkloadError};
use tensor_core::{DType, Permutation, Shape, TensorInfo};

/// CamelCase dtype suffix used in workload names.
pub(crate) fn dtype_suffix(dtype: DType) -> &'static str {
    match dtype {
        DType::F32 => "Float32",
        DType::F16 => "Float16",
        DType::BF16 => "BFloat16",
        DType::QAsymmU8 => "QAsymmU8",
        DType::QAsymmS8 => "QAsymmS8",
        DType::QSymmS16 => "QSymmS16",
    }
}

/// Shared validation for the dimension-movement workloads (permute and
/// transpose): 1-in/1-out arity, permutation length equal to the tensor
/// rank, matching dtypes, the expected output shape, and untouched
/// quantization parameters.
pub(crate) fn validate_movement_descriptor(
    operation: &str,
    descriptor: &QueueDescriptor,
    permutation: &Permutation,
    expected_output: &Shape,
    element_dtype: DType,
) -> Result<(), WorkloadError> {
    descriptor.validate_arity(operation, 1, 1)?;
    let input: &TensorInfo = &descriptor.inputs[0];
    let output: &TensorInfo = &descriptor.outputs[0];

    if permutation.rank() != input.shape().rank() {
        return Err(WorkloadError::InvalidDescriptor {
            operation: operation.to_string(),
            detail: format!(
                "permutation {permutation} does not cover tensor rank {}",
                input.shape().rank(),
            ),
        });
    }
    if input.dtype() != element_dtype || output.dtype() != element_dtype {
        return Err(WorkloadError::InvalidDescriptor {
            operation: operation.to_string(),
            detail: format!(
                "dtype mismatch: workload is {element_dtype}, tensors are {}/{}",
                input.dtype(),
                output.dtype(),
            ),
        });
    }
    if output.shape() != expected_output {
        return Err(WorkloadError::InvalidDescriptor {
            operation: operation.to_string(),
            detail: format!(
                "output shape {} does not match permuted input shape {expected_output}",
                output.shape(),
            ),
        });
    }
    if input.quantization() != output.quantization() {
        return Err(WorkloadError::InvalidDescriptor {
            operation: operation.to_string(),
            detail: "quantization parameters must pass through unchanged".into(),
        });
    }
    Ok(())
}
