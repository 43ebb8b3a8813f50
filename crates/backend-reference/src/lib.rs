// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # backend-reference
//!
//! The portable CPU reference backend. Its workloads are the semantic
//! ground truth for every operation: simple, allocation-free kernels
//! over contiguous row-major storage, specialized per element type at
//! lowering time.
//!
//! - [`RefPermuteWorkload`] / [`RefTransposeWorkload`] — dimension
//!   movement in the scatter and gather conventions, generic over
//!   [`tensor_core::Element`].
//! - [`RefReshapeWorkload`] — shape relabeling as a byte copy.
//! - [`RefWorkloadFactory`] — the backend's catalog, registered under
//!   the `"reference"` backend id.

mod factory;
mod workloads;

pub use factory::RefWorkloadFactory;
pub use workloads::{RefPermuteWorkload, RefReshapeWorkload, RefTransposeWorkload};
