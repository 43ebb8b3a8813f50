// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Immutable tensor descriptors: shape, dtype, and quantization parameters.

use crate::{DType, Shape, TensorError};

/// Scale and zero-point for a quantized tensor.
///
/// A real value `r` is represented as `q` with `r = scale * (q - offset)`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuantizationInfo {
    /// Strictly positive scale factor.
    pub scale: f32,
    /// Zero-point offset in the quantized domain.
    pub offset: i32,
}

/// Immutable description of a tensor: shape, element type, and (for
/// quantized types) scale/zero-point.
///
/// Construction enforces the two descriptor invariants:
/// - the shape has at least one dimension;
/// - quantization parameters are present iff the dtype is a quantized kind.
///
/// Once a `TensorInfo` is attached to a graph output slot that has
/// downstream consumers it must not be replaced; the graph enforces that
/// rule, not this type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensorInfo {
    shape: Shape,
    dtype: DType,
    quantization: Option<QuantizationInfo>,
}

impl TensorInfo {
    /// Creates a descriptor for a non-quantized tensor.
    ///
    /// # Errors
    /// [`TensorError::EmptyShape`] for a rank-0 shape;
    /// [`TensorError::MissingQuantization`] if `dtype` is a quantized kind.
    pub fn new(shape: Shape, dtype: DType) -> Result<Self, TensorError> {
        if shape.rank() == 0 {
            return Err(TensorError::EmptyShape);
        }
        if dtype.is_quantized() {
            return Err(TensorError::MissingQuantization { dtype });
        }
        Ok(Self {
            shape,
            dtype,
            quantization: None,
        })
    }

    /// Creates a descriptor for a quantized tensor.
    ///
    /// # Errors
    /// [`TensorError::EmptyShape`] for a rank-0 shape;
    /// [`TensorError::UnexpectedQuantization`] if `dtype` is not quantized;
    /// [`TensorError::InvalidQuantizationScale`] if `scale <= 0`.
    pub fn quantized(
        shape: Shape,
        dtype: DType,
        scale: f32,
        offset: i32,
    ) -> Result<Self, TensorError> {
        if shape.rank() == 0 {
            return Err(TensorError::EmptyShape);
        }
        if !dtype.is_quantized() {
            return Err(TensorError::UnexpectedQuantization { dtype });
        }
        if scale <= 0.0 {
            return Err(TensorError::InvalidQuantizationScale { scale });
        }
        Ok(Self {
            shape,
            dtype,
            quantization: Some(QuantizationInfo { scale, offset }),
        })
    }

    /// Returns the tensor shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the element data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the quantization parameters, if the dtype is quantized.
    pub fn quantization(&self) -> Option<QuantizationInfo> {
        self.quantization
    }

    /// Returns the total number of elements.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Returns the storage footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        self.shape.size_bytes(self.dtype)
    }

    /// Returns a copy of this descriptor with a different shape.
    ///
    /// Dtype and quantization carry over unchanged; used by rewrites and
    /// workloads that relabel or reorder dimensions without transforming
    /// element values.
    pub fn with_shape(&self, shape: Shape) -> TensorInfo {
        TensorInfo {
            shape,
            dtype: self.dtype,
            quantization: self.quantization,
        }
    }
}

impl std::fmt::Display for TensorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dtype, self.shape)?;
        if let Some(q) = self.quantization {
            write!(f, " (scale={}, offset={})", q.scale, q.offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_float() {
        let info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        assert_eq!(info.num_elements(), 6);
        assert_eq!(info.size_bytes(), 24);
        assert!(info.quantization().is_none());
    }

    #[test]
    fn test_new_rejects_quantized_dtype() {
        let result = TensorInfo::new(Shape::vector(4), DType::QAsymmU8);
        assert!(matches!(
            result,
            Err(TensorError::MissingQuantization { .. })
        ));
    }

    #[test]
    fn test_quantized() {
        let info =
            TensorInfo::quantized(Shape::matrix(2, 3), DType::QAsymmU8, 0.5, 128).unwrap();
        let q = info.quantization().unwrap();
        assert_eq!(q.scale, 0.5);
        assert_eq!(q.offset, 128);
    }

    #[test]
    fn test_quantized_rejects_float_dtype() {
        let result = TensorInfo::quantized(Shape::vector(4), DType::F32, 0.5, 0);
        assert!(matches!(
            result,
            Err(TensorError::UnexpectedQuantization { .. })
        ));
    }

    #[test]
    fn test_quantized_rejects_bad_scale() {
        let result = TensorInfo::quantized(Shape::vector(4), DType::QSymmS16, 0.0, 0);
        assert!(matches!(
            result,
            Err(TensorError::InvalidQuantizationScale { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_shape() {
        assert!(matches!(
            TensorInfo::new(Shape::new(vec![]), DType::F32),
            Err(TensorError::EmptyShape)
        ));
    }

    #[test]
    fn test_with_shape_preserves_quantization() {
        let info =
            TensorInfo::quantized(Shape::matrix(2, 3), DType::QAsymmS8, 0.1, -3).unwrap();
        let relabeled = info.with_shape(Shape::new(vec![3, 2]));
        assert_eq!(relabeled.quantization(), info.quantization());
        assert_eq!(relabeled.dtype(), info.dtype());
        assert_eq!(relabeled.shape(), &Shape::new(vec![3, 2]));
    }

    #[test]
    fn test_display() {
        let info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
        assert_eq!(format!("{info}"), "f32[2, 3]");
    }

    #[test]
    fn test_serde_roundtrip() {
        let info =
            TensorInfo::quantized(Shape::vector(8), DType::QSymmS16, 0.25, 0).unwrap();
        let json = serde_json::to_string(&info).unwrap();
        let back: TensorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
