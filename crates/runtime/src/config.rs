// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! backends = ["reference"]
//! strategy = "preferred-order"
//! enable_profiling = true
//! ```

use backend_core::{BackendId, WorkloadFactory};
use backend_planner::{AssignmentStrategy, PreferredOrder, SingleBackend};
use backend_reference::RefWorkloadFactory;
use std::path::Path;

/// Configuration for the network pipeline.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    /// Backend ids in preference order (most preferred first).
    pub backends: Vec<String>,
    /// Assignment strategy name: `"preferred-order"`, `"single-backend"`.
    pub strategy: String,
    /// Whether to record per-workload execution metrics.
    #[serde(default = "default_true")]
    pub enable_profiling: bool,
}

fn default_true() -> bool {
    true
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Instantiates the workload factories named by `backends`, in
    /// preference order.
    pub fn create_factories(
        &self,
    ) -> Result<Vec<Box<dyn WorkloadFactory>>, super::RuntimeError> {
        if self.backends.is_empty() {
            return Err(super::RuntimeError::ConfigError(
                "at least one backend must be configured".into(),
            ));
        }
        let mut factories: Vec<Box<dyn WorkloadFactory>> = Vec::new();
        for name in &self.backends {
            match name.to_lowercase().as_str() {
                "reference" => factories.push(Box::new(RefWorkloadFactory::new())),
                other => {
                    return Err(super::RuntimeError::ConfigError(format!(
                        "unknown backend '{other}'; expected 'reference'"
                    )))
                }
            }
        }
        Ok(factories)
    }

    /// Creates the assignment strategy specified by this config.
    pub fn create_strategy(
        &self,
    ) -> Result<Box<dyn AssignmentStrategy>, super::RuntimeError> {
        match self.strategy.to_lowercase().as_str() {
            "preferred-order" | "preferred" => Ok(Box::new(PreferredOrder::new())),
            "single-backend" | "single" => {
                let backend = self.backends.first().ok_or_else(|| {
                    super::RuntimeError::ConfigError(
                        "single-backend strategy needs a configured backend".into(),
                    )
                })?;
                Ok(Box::new(SingleBackend::new(BackendId::new(backend.clone()))))
            }
            other => Err(super::RuntimeError::ConfigError(format!(
                "unknown strategy '{other}'; expected 'preferred-order' or 'single-backend'"
            ))),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            backends: vec![RefWorkloadFactory::BACKEND.to_string()],
            strategy: "preferred-order".to_string(),
            enable_profiling: true,
        }
    }
}
