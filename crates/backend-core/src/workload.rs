// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The executable-unit contract every backend implements.

use crate::WorkloadError;
use tensor_core::{Tensor, TensorView};

/// A backend- and dtype-specialized executable unit implementing one
/// layer's operation.
///
/// A workload is constructed once at lowering time from a validated
/// [`crate::QueueDescriptor`] and holds only immutable parameters.
/// `execute` is a pure data transform over the storage bound per call:
/// it performs no allocation beyond fixed-size scratch computed at
/// construction, never touches graph topology, and may run concurrently
/// on the same instance as long as each call binds its own buffers.
pub trait Workload: Send + Sync {
    /// Human-readable name, e.g. `"RefPermuteF32Workload"`.
    fn name(&self) -> &str;

    /// Executes the operation against the bound storage.
    ///
    /// # Errors
    /// [`WorkloadError::BindingMismatch`] if the bound tensors disagree
    /// with the descriptor captured at creation.
    fn execute(
        &self,
        inputs: &[TensorView<'_>],
        outputs: &mut [Tensor],
    ) -> Result<(), WorkloadError>;
}
