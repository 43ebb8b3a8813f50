// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference transpose workload (gather convention).

use super::reindex::ReindexMap;
use super::{dtype_suffix, validate_movement_descriptor};
use backend_core::{QueueDescriptor, Workload, WorkloadError};
use graph_ir::LayerKind;
use std::marker::PhantomData;
use tensor_core::{Element, Tensor, TensorView};

/// Reads output dimension `i` from input dimension `perm[i]`.
///
/// The data path is the same pure reindexing as the permute workload,
/// with the opposite coordinate convention. Fires only for transposes
/// the optimizer could not rewrite into reshapes.
#[derive(Debug)]
pub struct RefTransposeWorkload<T: Element> {
    descriptor: QueueDescriptor,
    map: ReindexMap,
    name: String,
    _element: PhantomData<T>,
}

impl<T: Element> RefTransposeWorkload<T> {
    /// Validates the descriptor and precomputes the index mapping.
    ///
    /// # Errors
    /// [`WorkloadError::InvalidDescriptor`] under the same conditions as
    /// [`super::RefPermuteWorkload::new`].
    pub fn new(descriptor: QueueDescriptor) -> Result<Self, WorkloadError> {
        let LayerKind::Transpose(params) = &descriptor.params else {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "transpose".into(),
                detail: format!("descriptor carries {} parameters", descriptor.params),
            });
        };
        descriptor.validate_arity("transpose", 1, 1)?;

        let permutation = params.permutation.clone();
        let input_shape = descriptor.inputs[0].shape().clone();
        let expected_output = permutation.gather_shape(&input_shape);
        validate_movement_descriptor(
            "transpose",
            &descriptor,
            &permutation,
            &expected_output,
            T::DTYPE,
        )?;

        Ok(Self {
            map: ReindexMap::for_gather(&input_shape, &permutation),
            name: format!("RefTranspose{}Workload", dtype_suffix(T::DTYPE)),
            descriptor,
            _element: PhantomData,
        })
    }
}

impl<T: Element> Workload for RefTransposeWorkload<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        inputs: &[TensorView<'_>],
        outputs: &mut [Tensor],
    ) -> Result<(), WorkloadError> {
        self.descriptor
            .validate_binding("transpose", inputs, outputs)?;
        let src = inputs[0].as_slice::<T>();
        let dst = outputs[0].as_slice_mut::<T>();
        self.map.copy(src, dst);
        Ok(())
    }
}
