// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lowering plans: the output of backend assignment.
//!
//! A plan maps every compute layer of an optimized graph to the backend
//! whose factory will lower it. The plan is the contract between the
//! planner and the runtime: the runtime walks the graph in topological
//! order and asks the assigned factory for each layer's workload.

use crate::PlannerError;
use backend_core::BackendId;
use graph_ir::{Graph, LayerId};

/// One layer → backend decision.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LayerAssignment {
    /// Handle of the assigned layer.
    pub layer: LayerId,
    /// Debug name of the assigned layer.
    pub layer_name: String,
    /// The backend whose factory lowers this layer.
    pub backend: BackendId,
}

/// The complete backend assignment produced by an
/// [`crate::AssignmentStrategy`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoweringPlan {
    /// Strategy name that produced this plan.
    pub strategy_name: String,
    /// Assignments in the graph's topological order.
    pub assignments: Vec<LayerAssignment>,
}

impl LoweringPlan {
    /// Returns the number of assigned layers.
    pub fn num_assignments(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the backend assigned to `layer`, if any.
    pub fn backend_for(&self, layer: LayerId) -> Option<&BackendId> {
        self.assignments
            .iter()
            .find(|a| a.layer == layer)
            .map(|a| &a.backend)
    }

    /// Validates the plan against the graph it was produced for.
    ///
    /// # Checks
    /// - Every compute (non-Input/Output) layer is assigned exactly once.
    /// - Every assignment refers to a live compute layer.
    pub fn validate(&self, graph: &Graph) -> Result<(), PlannerError> {
        for assignment in &self.assignments {
            let layer = graph.layer(assignment.layer).ok_or_else(|| {
                PlannerError::StrategyFailed {
                    strategy: self.strategy_name.clone(),
                    detail: format!(
                        "assignment for '{}' refers to a removed layer",
                        assignment.layer_name,
                    ),
                }
            })?;
            if !layer.kind().is_compute() {
                return Err(PlannerError::StrategyFailed {
                    strategy: self.strategy_name.clone(),
                    detail: format!(
                        "layer '{}' ({}) is a binding point, not a workload",
                        assignment.layer_name,
                        layer.kind(),
                    ),
                });
            }
        }

        for id in graph.layers() {
            let layer = graph.layer(id).expect("live layer");
            if !layer.kind().is_compute() {
                continue;
            }
            let count = self.assignments.iter().filter(|a| a.layer == id).count();
            if count != 1 {
                return Err(PlannerError::StrategyFailed {
                    strategy: self.strategy_name.clone(),
                    detail: format!(
                        "layer '{}' has {count} assignments, expected exactly 1",
                        layer.name(),
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let mut per_backend: Vec<(String, usize)> = Vec::new();
        for assignment in &self.assignments {
            let key = assignment.backend.to_string();
            match per_backend.iter_mut().find(|(name, _)| *name == key) {
                Some((_, count)) => *count += 1,
                None => per_backend.push((key, 1)),
            }
        }
        let breakdown: Vec<String> = per_backend
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect();
        format!(
            "Plan '{}': {} workload layer(s) ({})",
            self.strategy_name,
            self.num_assignments(),
            if breakdown.is_empty() {
                "none".to_string()
            } else {
                breakdown.join(", ")
            },
        )
    }
}
