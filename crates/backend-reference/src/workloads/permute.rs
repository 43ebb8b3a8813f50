// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference permute workload (scatter convention).

use super::reindex::ReindexMap;
use super::{dtype_suffix, validate_movement_descriptor};
use backend_core::{QueueDescriptor, Workload, WorkloadError};
use graph_ir::LayerKind;
use std::marker::PhantomData;
use tensor_core::{Element, Tensor, TensorView};

/// Moves input dimension `i` to output dimension `perm[i]`, copying
/// elements without transforming them; quantization scale and zero-point
/// pass through unchanged.
#[derive(Debug)]
pub struct RefPermuteWorkload<T: Element> {
    descriptor: QueueDescriptor,
    map: ReindexMap,
    name: String,
    _element: PhantomData<T>,
}

impl<T: Element> RefPermuteWorkload<T> {
    /// Validates the descriptor and precomputes the index mapping.
    ///
    /// # Errors
    /// [`WorkloadError::InvalidDescriptor`] on wrong arity, a permutation
    /// not covering the tensor rank, dtype disagreement with `T`, an
    /// output shape that is not the permuted input shape, or altered
    /// quantization parameters.
    pub fn new(descriptor: QueueDescriptor) -> Result<Self, WorkloadError> {
        let LayerKind::Permute(params) = &descriptor.params else {
            return Err(WorkloadError::InvalidDescriptor {
                operation: "permute".into(),
                detail: format!("descriptor carries {} parameters", descriptor.params),
            });
        };
        descriptor.validate_arity("permute", 1, 1)?;

        let permutation = params.permutation.clone();
        let input_shape = descriptor.inputs[0].shape().clone();
        let expected_output = permutation.scatter_shape(&input_shape);
        validate_movement_descriptor(
            "permute",
            &descriptor,
            &permutation,
            &expected_output,
            T::DTYPE,
        )?;

        Ok(Self {
            map: ReindexMap::for_scatter(&input_shape, &permutation),
            name: format!("RefPermute{}Workload", dtype_suffix(T::DTYPE)),
            descriptor,
            _element: PhantomData,
        })
    }
}

impl<T: Element> Workload for RefPermuteWorkload<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        inputs: &[TensorView<'_>],
        outputs: &mut [Tensor],
    ) -> Result<(), WorkloadError> {
        self.descriptor.validate_binding("permute", inputs, outputs)?;
        let src = inputs[0].as_slice::<T>();
        let dst = outputs[0].as_slice_mut::<T>();
        self.map.copy(src, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_ir::PermuteDescriptor;
    use tensor_core::{DType, Permutation, Shape, TensorInfo};

    fn permute_descriptor(
        input: TensorInfo,
        output: TensorInfo,
        mapping: Vec<usize>,
    ) -> QueueDescriptor {
        QueueDescriptor {
            layer_name: "permute".into(),
            params: LayerKind::Permute(PermuteDescriptor {
                permutation: Permutation::new(mapping).unwrap(),
            }),
            inputs: vec![input],
            outputs: vec![output],
        }
    }

    #[test]
    fn test_permute_f32() {
        let input_info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        let output_info = TensorInfo::new(Shape::matrix(3, 2), DType::F32).unwrap();
        let workload = RefPermuteWorkload::<f32>::new(permute_descriptor(
            input_info.clone(),
            output_info.clone(),
            vec![1, 0],
        ))
        .unwrap();
        assert_eq!(workload.name(), "RefPermuteFloat32Workload");

        let input =
            Tensor::from_elems(input_info, &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut outputs = vec![Tensor::zeros(output_info)];
        workload.execute(&[input.view()], &mut outputs).unwrap();
        assert_eq!(
            outputs[0].as_slice::<f32>(),
            &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0],
        );
    }

    #[test]
    fn test_permute_quantized_preserves_parameters() {
        let input_info =
            TensorInfo::quantized(Shape::matrix(2, 3), DType::QAsymmU8, 0.5, 128).unwrap();
        let output_info =
            TensorInfo::quantized(Shape::matrix(3, 2), DType::QAsymmU8, 0.5, 128).unwrap();
        let workload = RefPermuteWorkload::<u8>::new(permute_descriptor(
            input_info.clone(),
            output_info.clone(),
            vec![1, 0],
        ))
        .unwrap();

        let input = Tensor::from_elems(input_info, &[1u8, 2, 3, 4, 5, 6]).unwrap();
        let mut outputs = vec![Tensor::zeros(output_info)];
        workload.execute(&[input.view()], &mut outputs).unwrap();

        assert_eq!(outputs[0].as_slice::<u8>(), &[1, 4, 2, 5, 3, 6]);
        let q = outputs[0].info().quantization().unwrap();
        assert_eq!(q.scale, 0.5);
        assert_eq!(q.offset, 128);
    }

    #[test]
    fn test_rejects_wrong_permutation_length() {
        let input_info = TensorInfo::new(Shape::new(vec![2, 3, 4]), DType::F32).unwrap();
        let output_info = TensorInfo::new(Shape::new(vec![3, 2, 4]), DType::F32).unwrap();
        let descriptor = permute_descriptor(input_info, output_info, vec![1, 0]);
        let result = RefPermuteWorkload::<f32>::new(descriptor);
        assert!(matches!(
            result,
            Err(WorkloadError::InvalidDescriptor { .. }),
        ));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        let mut descriptor =
            permute_descriptor(info.clone(), info.clone(), vec![1, 0]);
        descriptor.inputs.push(info);
        let result = RefPermuteWorkload::<f32>::new(descriptor);
        assert!(matches!(
            result,
            Err(WorkloadError::InvalidDescriptor { .. }),
        ));
    }

    #[test]
    fn test_rejects_dtype_disagreement() {
        let input_info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        let output_info = TensorInfo::new(Shape::matrix(3, 2), DType::F32).unwrap();
        let descriptor = permute_descriptor(input_info, output_info, vec![1, 0]);
        let result = RefPermuteWorkload::<i16>::new(descriptor);
        assert!(matches!(
            result,
            Err(WorkloadError::InvalidDescriptor { .. }),
        ));
    }

    #[test]
    fn test_rejects_altered_quantization() {
        let input_info =
            TensorInfo::quantized(Shape::matrix(2, 3), DType::QAsymmS8, 0.5, 0).unwrap();
        let output_info =
            TensorInfo::quantized(Shape::matrix(3, 2), DType::QAsymmS8, 0.25, 0).unwrap();
        let descriptor = permute_descriptor(input_info, output_info, vec![1, 0]);
        let result = RefPermuteWorkload::<i8>::new(descriptor);
        assert!(matches!(
            result,
            Err(WorkloadError::InvalidDescriptor { .. }),
        ));
    }

    #[test]
    fn test_execute_rejects_mismatched_binding() {
        let input_info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        let output_info = TensorInfo::new(Shape::matrix(3, 2), DType::F32).unwrap();
        let workload = RefPermuteWorkload::<f32>::new(permute_descriptor(
            input_info.clone(),
            output_info,
            vec![1, 0],
        ))
        .unwrap();

        let input = Tensor::zeros(input_info.clone());
        // Output bound with the un-permuted shape.
        let mut outputs = vec![Tensor::zeros(input_info)];
        let result = workload.execute(&[input.view()], &mut outputs);
        assert!(matches!(result, Err(WorkloadError::BindingMismatch { .. })));
    }
}
