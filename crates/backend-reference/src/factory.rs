// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The reference backend's workload factory.

use crate::workloads::{RefPermuteWorkload, RefReshapeWorkload, RefTransposeWorkload};
use backend_core::{BackendId, QueueDescriptor, Workload, WorkloadError, WorkloadFactory};
use graph_ir::LayerKind;
use tensor_core::DType;

/// Creates reference CPU workloads, specialized per dtype at creation.
///
/// Every operation is supported for every dtype; the reference backend
/// is the always-available fallback other backends are measured against.
#[derive(Debug, Clone, Default)]
pub struct RefWorkloadFactory;

impl RefWorkloadFactory {
    /// The backend id this factory registers under.
    pub const BACKEND: &'static str = "reference";

    pub fn new() -> Self {
        Self
    }
}

impl WorkloadFactory for RefWorkloadFactory {
    fn backend(&self) -> BackendId {
        BackendId::new(Self::BACKEND)
    }

    fn is_supported(&self, descriptor: &QueueDescriptor) -> bool {
        descriptor.params.is_compute() && descriptor.dtype().is_ok()
    }

    fn create_workload(
        &self,
        descriptor: QueueDescriptor,
    ) -> Result<Box<dyn Workload>, WorkloadError> {
        match &descriptor.params {
            LayerKind::Permute(_) => make_permute(descriptor),
            LayerKind::Transpose(_) => make_transpose(descriptor),
            LayerKind::Reshape(_) => Ok(Box::new(RefReshapeWorkload::new(descriptor)?)),
            LayerKind::Input | LayerKind::Output => Err(WorkloadError::InvalidDescriptor {
                operation: descriptor.params.as_str().to_string(),
                detail: "input/output binding points do not lower to workloads".into(),
            }),
        }
    }
}

fn make_permute(descriptor: QueueDescriptor) -> Result<Box<dyn Workload>, WorkloadError> {
    match descriptor.dtype()? {
        DType::F32 => Ok(Box::new(RefPermuteWorkload::<f32>::new(descriptor)?)),
        DType::F16 => Ok(Box::new(RefPermuteWorkload::<half::f16>::new(descriptor)?)),
        DType::BF16 => Ok(Box::new(RefPermuteWorkload::<half::bf16>::new(descriptor)?)),
        DType::QAsymmU8 => Ok(Box::new(RefPermuteWorkload::<u8>::new(descriptor)?)),
        DType::QAsymmS8 => Ok(Box::new(RefPermuteWorkload::<i8>::new(descriptor)?)),
        DType::QSymmS16 => Ok(Box::new(RefPermuteWorkload::<i16>::new(descriptor)?)),
    }
}

fn make_transpose(descriptor: QueueDescriptor) -> Result<Box<dyn Workload>, WorkloadError> {
    match descriptor.dtype()? {
        DType::F32 => Ok(Box::new(RefTransposeWorkload::<f32>::new(descriptor)?)),
        DType::F16 => Ok(Box::new(RefTransposeWorkload::<half::f16>::new(descriptor)?)),
        DType::BF16 => Ok(Box::new(RefTransposeWorkload::<half::bf16>::new(
            descriptor,
        )?)),
        DType::QAsymmU8 => Ok(Box::new(RefTransposeWorkload::<u8>::new(descriptor)?)),
        DType::QAsymmS8 => Ok(Box::new(RefTransposeWorkload::<i8>::new(descriptor)?)),
        DType::QSymmS16 => Ok(Box::new(RefTransposeWorkload::<i16>::new(descriptor)?)),
    }
}
