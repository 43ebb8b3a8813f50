// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Shape, data-type, and storage primitives shared by the graph IR, the
//! optimizer, and the backends:
//!
//! - [`Shape`] — dimension sizes, strides, and linear-index helpers.
//! - [`DType`] — element types, including the quantized kinds.
//! - [`TensorInfo`] — the immutable shape/dtype/quantization descriptor
//!   attached to every graph output slot.
//! - [`Permutation`] — validated dimension mappings with the gather
//!   (Transpose) and scatter (Permute) application conventions.
//! - [`Element`] — the bridge from Rust element types to [`DType`] tags,
//!   used to instantiate dtype-specialized workloads.
//! - [`Tensor`] / [`TensorView`] — concrete row-major storage bound to
//!   workloads at execution time.

mod dtype;
mod element;
mod error;
mod info;
mod permutation;
mod shape;
mod tensor;

pub use dtype::DType;
pub use element::Element;
pub use error::TensorError;
pub use info::{QuantizationInfo, TensorInfo};
pub use permutation::Permutation;
pub use shape::Shape;
pub use tensor::{Tensor, TensorView};
