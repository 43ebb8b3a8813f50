// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Mapping between Rust element types and [`DType`] tags.
//!
//! Workloads that are generic over the element type are instantiated once
//! per supported dtype at lowering time; [`Element`] is the bridge that
//! lets a `RefPermuteWorkload<T>` assert at construction that its type
//! parameter matches the descriptor's dtype.

use crate::DType;

/// A plain-old-data element type usable as tensor storage.
pub trait Element: Copy + Send + Sync + 'static {
    /// The dtype tag corresponding to this Rust type.
    const DTYPE: DType;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;
}

impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;
}

impl Element for u8 {
    const DTYPE: DType = DType::QAsymmU8;
}

impl Element for i8 {
    const DTYPE: DType = DType::QAsymmS8;
}

impl Element for i16 {
    const DTYPE: DType = DType::QSymmS16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths_match_dtype() {
        assert_eq!(std::mem::size_of::<f32>(), DType::F32.size_bytes());
        assert_eq!(std::mem::size_of::<half::f16>(), DType::F16.size_bytes());
        assert_eq!(std::mem::size_of::<half::bf16>(), DType::BF16.size_bytes());
        assert_eq!(std::mem::size_of::<u8>(), DType::QAsymmU8.size_bytes());
        assert_eq!(std::mem::size_of::<i8>(), DType::QAsymmS8.size_bytes());
        assert_eq!(std::mem::size_of::<i16>(), DType::QSymmS16.size_bytes());
    }
}
