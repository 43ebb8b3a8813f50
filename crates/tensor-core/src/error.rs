// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor descriptors and storage.

use crate::DType;

/// Errors that can occur when constructing tensor descriptors or storage.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer size does not match the expected size for the given shape and dtype.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A tensor shape must have at least one dimension.
    #[error("tensor shape must have at least one dimension")]
    EmptyShape,

    /// A quantized dtype was used without quantization parameters.
    #[error("dtype {dtype} is quantized but no quantization info was supplied")]
    MissingQuantization { dtype: DType },

    /// Quantization parameters were supplied for a non-quantized dtype.
    #[error("dtype {dtype} is not quantized but quantization info was supplied")]
    UnexpectedQuantization { dtype: DType },

    /// The quantization scale must be strictly positive.
    #[error("quantization scale must be > 0, got {scale}")]
    InvalidQuantizationScale { scale: f32 },

    /// The element type of a typed buffer does not match the tensor dtype.
    #[error("dtype mismatch: tensor is {expected}, buffer is {actual}")]
    DTypeMismatch { expected: DType, actual: DType },

    /// The mapping vector is not a permutation of `0..rank`.
    #[error("invalid permutation {mapping:?}: {detail}")]
    InvalidPermutation {
        mapping: Vec<usize>,
        detail: String,
    },
}
