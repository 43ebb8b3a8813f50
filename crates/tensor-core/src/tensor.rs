// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Concrete tensor storage and view abstractions.

use crate::{Element, TensorError, TensorInfo};

/// An owned, n-dimensional tensor stored in contiguous memory.
///
/// `Tensor` is the storage bound to workload input/output slots at
/// execution time. It pairs a [`TensorInfo`] descriptor with a flat
/// row-major (C order) byte buffer; typed access is provided through the
/// [`Element`] trait.
#[derive(Debug, Clone)]
pub struct Tensor {
    info: TensorInfo,
    data: Vec<u8>,
}

impl Tensor {
    /// Creates a new tensor filled with zero bytes.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{DType, Shape, Tensor, TensorInfo};
    /// let info = TensorInfo::new(Shape::matrix(2, 3), DType::F32).unwrap();
    /// let t = Tensor::zeros(info);
    /// assert_eq!(t.size_bytes(), 24); // 2 * 3 * 4 bytes
    /// ```
    pub fn zeros(info: TensorInfo) -> Self {
        let size = info.size_bytes();
        Self {
            info,
            data: vec![0u8; size],
        }
    }

    /// Creates a tensor from raw bytes.
    ///
    /// Returns an error if the buffer size does not match `info.size_bytes()`.
    pub fn from_bytes(info: TensorInfo, data: Vec<u8>) -> Result<Self, TensorError> {
        let expected = info.size_bytes();
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { info, data })
    }

    /// Creates a tensor from a slice of typed elements.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{DType, Shape, Tensor, TensorInfo};
    /// let info = TensorInfo::new(Shape::vector(3), DType::F32).unwrap();
    /// let t = Tensor::from_elems(info, &[1.0f32, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice::<f32>(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_elems<T: Element>(info: TensorInfo, values: &[T]) -> Result<Self, TensorError> {
        if info.dtype() != T::DTYPE {
            return Err(TensorError::DTypeMismatch {
                expected: info.dtype(),
                actual: T::DTYPE,
            });
        }
        if values.len() != info.num_elements() {
            return Err(TensorError::BufferSizeMismatch {
                expected: info.size_bytes(),
                actual: values.len() * std::mem::size_of::<T>(),
            });
        }
        // SAFETY: reinterpreting &[T] as &[u8] is safe for Copy POD types.
        let bytes = unsafe {
            std::slice::from_raw_parts(
                values.as_ptr() as *const u8,
                values.len() * std::mem::size_of::<T>(),
            )
        };
        Ok(Self {
            info,
            data: bytes.to_vec(),
        })
    }

    /// Returns the tensor's descriptor.
    pub fn info(&self) -> &TensorInfo {
        &self.info
    }

    /// Returns an immutable view over this tensor's data.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            info: &self.info,
            data: &self.data,
        }
    }

    /// Returns the raw byte slice backing this tensor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw byte buffer.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the memory footprint of this tensor in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Interprets the buffer as a slice of `T`.
    ///
    /// # Panics
    /// Panics if `T::DTYPE` does not match the tensor's dtype.
    pub fn as_slice<T: Element>(&self) -> &[T] {
        assert_eq!(
            self.info.dtype(),
            T::DTYPE,
            "as_slice::<{}> called on {} tensor",
            T::DTYPE,
            self.info.dtype(),
        );
        // SAFETY: length and dtype were validated at construction; the
        // buffer originated from values of T (or zero bytes, which are a
        // valid bit pattern for every supported element type).
        unsafe {
            std::slice::from_raw_parts(self.data.as_ptr() as *const T, self.info.num_elements())
        }
    }

    /// Interprets the buffer as a mutable slice of `T`.
    ///
    /// # Panics
    /// Panics if `T::DTYPE` does not match the tensor's dtype.
    pub fn as_slice_mut<T: Element>(&mut self) -> &mut [T] {
        assert_eq!(
            self.info.dtype(),
            T::DTYPE,
            "as_slice_mut::<{}> called on {} tensor",
            T::DTYPE,
            self.info.dtype(),
        );
        let n = self.info.num_elements();
        unsafe { std::slice::from_raw_parts_mut(self.data.as_mut_ptr() as *mut T, n) }
    }
}

/// A borrowed, read-only view over a [`Tensor`]'s data.
///
/// Views are zero-copy and tied to the lifetime of the source tensor,
/// enforced by the borrow checker.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    info: &'a TensorInfo,
    data: &'a [u8],
}

impl<'a> TensorView<'a> {
    /// Creates a view from raw parts.
    pub fn from_parts(info: &'a TensorInfo, data: &'a [u8]) -> Self {
        Self { info, data }
    }

    /// Returns the descriptor of the viewed tensor.
    pub fn info(&self) -> &TensorInfo {
        self.info
    }

    /// Returns the raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    /// Interprets the view as a slice of `T`.
    ///
    /// # Panics
    /// Panics if `T::DTYPE` does not match the viewed dtype.
    pub fn as_slice<T: Element>(&self) -> &[T] {
        assert_eq!(
            self.info.dtype(),
            T::DTYPE,
            "as_slice::<{}> called on {} view",
            T::DTYPE,
            self.info.dtype(),
        );
        unsafe {
            std::slice::from_raw_parts(self.data.as_ptr() as *const T, self.info.num_elements())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DType, Shape};

    fn f32_info(dims: Vec<usize>) -> TensorInfo {
        TensorInfo::new(Shape::new(dims), DType::F32).unwrap()
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(f32_info(vec![2, 3]));
        assert_eq!(t.size_bytes(), 24);
        assert_eq!(t.info().dtype(), DType::F32);
        assert!(t.as_slice::<f32>().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_elems() {
        let data = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = Tensor::from_elems(f32_info(vec![2, 3]), &data).unwrap();
        assert_eq!(t.as_slice::<f32>(), &data[..]);
    }

    #[test]
    fn test_from_elems_dtype_mismatch() {
        let result = Tensor::from_elems(f32_info(vec![3]), &[1u8, 2, 3]);
        assert!(matches!(result, Err(TensorError::DTypeMismatch { .. })));
    }

    #[test]
    fn test_from_bytes_size_mismatch() {
        let result = Tensor::from_bytes(f32_info(vec![2, 3]), vec![0u8; 10]);
        assert!(matches!(
            result,
            Err(TensorError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_quantized_elements() {
        let info =
            TensorInfo::quantized(Shape::vector(4), DType::QAsymmU8, 0.5, 128).unwrap();
        let t = Tensor::from_elems(info, &[10u8, 20, 30, 40]).unwrap();
        assert_eq!(t.as_slice::<u8>(), &[10, 20, 30, 40]);
        assert_eq!(t.info().quantization().unwrap().offset, 128);
    }

    #[test]
    fn test_view_lifetime() {
        let t = Tensor::from_elems(f32_info(vec![4]), &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
        let v = t.view();
        assert_eq!(v.info().shape(), &Shape::vector(4));
        assert_eq!(v.as_slice::<f32>(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_as_slice_mut() {
        let mut t = Tensor::zeros(f32_info(vec![3]));
        let slice = t.as_slice_mut::<f32>();
        slice[0] = 10.0;
        slice[1] = 20.0;
        slice[2] = 30.0;
        assert_eq!(t.as_slice::<f32>(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    #[should_panic(expected = "as_slice")]
    fn test_as_slice_wrong_type_panics() {
        let t = Tensor::zeros(f32_info(vec![3]));
        let _ = t.as_slice::<i16>();
    }

    #[test]
    fn test_f16_elements() {
        let info = TensorInfo::new(Shape::vector(2), DType::F16).unwrap();
        let values = [half::f16::from_f32(1.5), half::f16::from_f32(-2.0)];
        let t = Tensor::from_elems(info, &values).unwrap();
        assert_eq!(t.as_slice::<half::f16>(), &values[..]);
    }
}
