// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported tensor element data types.

/// Enumerates the numeric types a tensor can hold.
///
/// The compiler uses `DType` to decide element width and which typed
/// workload a backend factory instantiates. Quantized kinds carry their
/// scale/zero-point in the surrounding [`crate::TensorInfo`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DType {
    /// 32-bit IEEE 754 floating point.
    F32,
    /// 16-bit IEEE 754 floating point.
    F16,
    /// 16-bit brain floating point.
    BF16,
    /// 8-bit unsigned asymmetric quantized.
    QAsymmU8,
    /// 8-bit signed asymmetric quantized.
    QAsymmS8,
    /// 16-bit signed symmetric quantized.
    QSymmS16,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F16 => 2,
            DType::BF16 => 2,
            DType::QAsymmU8 => 1,
            DType::QAsymmS8 => 1,
            DType::QSymmS16 => 2,
        }
    }

    /// Returns `true` if this is a quantized kind.
    ///
    /// Quantized tensors must carry a scale and zero-point in their
    /// [`crate::TensorInfo`]; non-quantized tensors must not.
    pub fn is_quantized(self) -> bool {
        matches!(self, DType::QAsymmU8 | DType::QAsymmS8 | DType::QSymmS16)
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::QAsymmU8 => "qasymm_u8",
            DType::QAsymmS8 => "qasymm_s8",
            DType::QSymmS16 => "qsymm_s16",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
