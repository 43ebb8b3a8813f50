// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Validated dimension-permutation vectors.
//!
//! A [`Permutation`] is used by two layer kinds with opposite conventions:
//!
//! - **Transpose** (gather): output dimension `i` is taken from input
//!   dimension `perm[i]`.
//! - **Permute** (scatter): input dimension `i` is sent to output
//!   dimension `perm[i]`.
//!
//! [`Permutation::gather_shape`] and [`Permutation::scatter_shape`] apply
//! the respective convention to a [`Shape`].

use crate::{Shape, TensorError};

/// A bijective mapping over tensor dimensions.
///
/// Construction validates that the vector is a true permutation of
/// `0..rank`, so downstream code can index with it unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Permutation {
    mapping: Vec<usize>,
}

impl Permutation {
    /// Creates a permutation, validating bijectivity.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidPermutation`] if the vector is empty,
    /// contains an out-of-range index, or repeats an index.
    pub fn new(mapping: Vec<usize>) -> Result<Self, TensorError> {
        if mapping.is_empty() {
            return Err(TensorError::InvalidPermutation {
                mapping,
                detail: "permutation is empty".into(),
            });
        }
        let rank = mapping.len();
        let mut seen = vec![false; rank];
        for &m in &mapping {
            if m >= rank {
                return Err(TensorError::InvalidPermutation {
                    mapping: mapping.clone(),
                    detail: format!("index {m} out of range for rank {rank}"),
                });
            }
            if seen[m] {
                return Err(TensorError::InvalidPermutation {
                    mapping: mapping.clone(),
                    detail: format!("index {m} appears more than once"),
                });
            }
            seen[m] = true;
        }
        Ok(Self { mapping })
    }

    /// Returns the number of dimensions this permutation covers.
    pub fn rank(&self) -> usize {
        self.mapping.len()
    }

    /// Returns the mapping as a slice.
    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    /// Returns `true` if this permutation maps every index to itself.
    pub fn is_identity(&self) -> bool {
        self.mapping.iter().enumerate().all(|(i, &m)| i == m)
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> Permutation {
        let mut inv = vec![0usize; self.mapping.len()];
        for (i, &m) in self.mapping.iter().enumerate() {
            inv[m] = i;
        }
        Permutation { mapping: inv }
    }

    /// Applies this permutation with gather semantics:
    /// `out_dim[i] = in_dim[perm[i]]` (the Transpose convention).
    pub fn gather_shape(&self, shape: &Shape) -> Shape {
        debug_assert_eq!(shape.rank(), self.rank());
        Shape::new(self.mapping.iter().map(|&m| shape.dims()[m]).collect())
    }

    /// Applies this permutation with scatter semantics:
    /// `out_dim[perm[i]] = in_dim[i]` (the Permute convention).
    pub fn scatter_shape(&self, shape: &Shape) -> Shape {
        debug_assert_eq!(shape.rank(), self.rank());
        let mut dims = vec![0usize; self.rank()];
        for (i, &m) in self.mapping.iter().enumerate() {
            dims[m] = shape.dims()[i];
        }
        Shape::new(dims)
    }
}

impl std::fmt::Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, m) in self.mapping.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let p = Permutation::new(vec![0, 3, 1, 2]).unwrap();
        assert_eq!(p.rank(), 4);
        assert!(!p.is_identity());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Permutation::new(vec![0, 4, 1, 2]).is_err());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        assert!(Permutation::new(vec![0, 1, 1, 2]).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Permutation::new(vec![]).is_err());
    }

    #[test]
    fn test_identity() {
        assert!(Permutation::new(vec![0, 1, 2]).unwrap().is_identity());
        assert!(!Permutation::new(vec![0, 2, 1]).unwrap().is_identity());
    }

    #[test]
    fn test_inverse() {
        let p = Permutation::new(vec![0, 3, 1, 2]).unwrap();
        let inv = p.inverse();
        assert_eq!(inv.mapping(), &[0, 2, 3, 1]);

        // Composing with the inverse yields the identity.
        let composed: Vec<usize> = (0..4).map(|i| p.mapping()[inv.mapping()[i]]).collect();
        assert_eq!(composed, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_gather_shape() {
        // The Transpose convention: out_dim[i] = in_dim[perm[i]].
        let p = Permutation::new(vec![0, 3, 1, 2]).unwrap();
        let out = p.gather_shape(&Shape::new(vec![1, 2, 3, 1]));
        assert_eq!(out, Shape::new(vec![1, 1, 2, 3]));
    }

    #[test]
    fn test_scatter_shape() {
        // The Permute convention: out_dim[perm[i]] = in_dim[i].
        let p = Permutation::new(vec![0, 3, 1, 2]).unwrap();
        let out = p.scatter_shape(&Shape::new(vec![1, 2, 3, 1]));
        assert_eq!(out, Shape::new(vec![1, 3, 1, 2]));
    }

    #[test]
    fn test_gather_scatter_inverse_relation() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        let shape = Shape::new(vec![4, 5, 6]);
        assert_eq!(p.gather_shape(&shape), p.inverse().scatter_shape(&shape));
    }

    #[test]
    fn test_display() {
        let p = Permutation::new(vec![1, 0]).unwrap();
        assert_eq!(format!("{p}"), "(1, 0)");
    }
}
