// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-backend workload factory contract.

use crate::{QueueDescriptor, Workload, WorkloadError};

/// Identifies a compute backend (e.g. `"reference"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BackendId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creates typed workloads for the operations a backend supports.
///
/// Factories are read-mostly catalogs: `create_workload` must be safe to
/// call concurrently for independently loaded networks.
pub trait WorkloadFactory: Send + Sync {
    /// The backend this factory produces workloads for.
    fn backend(&self) -> BackendId;

    /// Returns `true` if this backend can lower the described layer —
    /// the capability query backend assignment is built on.
    fn is_supported(&self, descriptor: &QueueDescriptor) -> bool;

    /// Instantiates the workload for the described layer, specialized by
    /// the descriptor's dtype.
    ///
    /// # Errors
    /// [`WorkloadError::Unsupported`] for an (operation, dtype) pair not
    /// registered with this backend — a fatal configuration error;
    /// [`WorkloadError::InvalidDescriptor`] for a malformed descriptor,
    /// rejected here rather than discovered mid-`execute`.
    fn create_workload(
        &self,
        descriptor: QueueDescriptor,
    ) -> Result<Box<dyn Workload>, WorkloadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_id_display_and_eq() {
        let id = BackendId::new("reference");
        assert_eq!(id.as_str(), "reference");
        assert_eq!(format!("{id}"), "reference");
        assert_eq!(id, BackendId::from("reference"));
    }
}
