// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The shared element-reindexing kernel behind the permute and transpose
//! workloads.
//!
//! For every linear index in the output tensor, the kernel decomposes it
//! into per-dimension coordinates using the output shape, maps those
//! coordinates back through the permutation, and copies one element.
//! The coordinate mapping is folded into a per-axis stride table at
//! construction, so the per-element work is pure integer arithmetic and
//! `copy` performs no allocation.

use tensor_core::{Permutation, Shape};

/// Precomputed output-to-input index mapping for one permutation.
#[derive(Debug, Clone)]
pub(crate) struct ReindexMap {
    dst_strides: Vec<usize>,
    src_strides_by_dst: Vec<usize>,
    num_elements: usize,
}

impl ReindexMap {
    /// Builds the mapping for gather semantics (Transpose):
    /// output dimension `i` reads input dimension `perm[i]`.
    pub fn for_gather(input_shape: &Shape, permutation: &Permutation) -> Self {
        let output_shape = permutation.gather_shape(input_shape);
        let src_strides = input_shape.strides();
        let src_strides_by_dst = permutation
            .mapping()
            .iter()
            .map(|&m| src_strides[m])
            .collect();
        Self {
            dst_strides: output_shape.strides(),
            src_strides_by_dst,
            num_elements: output_shape.num_elements(),
        }
    }

    /// Builds the mapping for scatter semantics (Permute):
    /// input dimension `i` lands in output dimension `perm[i]`.
    pub fn for_scatter(input_shape: &Shape, permutation: &Permutation) -> Self {
        let output_shape = permutation.scatter_shape(input_shape);
        let src_strides = input_shape.strides();
        let mut src_strides_by_dst = vec![0usize; permutation.rank()];
        for (axis, &m) in permutation.mapping().iter().enumerate() {
            src_strides_by_dst[m] = src_strides[axis];
        }
        Self {
            dst_strides: output_shape.strides(),
            src_strides_by_dst,
            num_elements: output_shape.num_elements(),
        }
    }

    /// Copies every element from `src` to its reindexed position in `dst`.
    ///
    /// Pure reindexing: element values pass through untouched, so
    /// quantization parameters are preserved by construction.
    pub fn copy<T: Copy>(&self, src: &[T], dst: &mut [T]) {
        debug_assert_eq!(src.len(), self.num_elements);
        debug_assert_eq!(dst.len(), self.num_elements);
        for dst_index in 0..self.num_elements {
            let mut src_index = 0;
            let mut rem = dst_index;
            for (dst_stride, src_stride) in
                self.dst_strides.iter().zip(&self.src_strides_by_dst)
            {
                src_index += (rem / dst_stride) * src_stride;
                rem %= dst_stride;
            }
            dst[dst_index] = src[src_index];
        }
    }
}
