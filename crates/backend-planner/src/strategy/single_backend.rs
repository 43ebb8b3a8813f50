// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Single-backend assignment strategy.
//!
//! Pins every compute layer to one named backend. Useful for conformance
//! runs against the reference backend and for debugging a backend in
//! isolation; any layer the backend cannot lower fails the plan rather
//! than falling back elsewhere.

use crate::plan::{LayerAssignment, LoweringPlan};
use crate::strategy::AssignmentStrategy;
use crate::PlannerError;
use backend_core::{BackendId, QueueDescriptor, WorkloadFactory};
use graph_ir::Graph;

/// Pins all layers to one backend, no fallback.
#[derive(Debug, Clone)]
pub struct SingleBackend {
    backend: BackendId,
}

impl SingleBackend {
    pub fn new(backend: BackendId) -> Self {
        Self { backend }
    }
}

impl AssignmentStrategy for SingleBackend {
    fn name(&self) -> &str {
        "single-backend"
    }

    fn assign(
        &self,
        graph: &Graph,
        factories: &[Box<dyn WorkloadFactory>],
    ) -> Result<LoweringPlan, PlannerError> {
        if graph.num_layers() == 0 {
            return Err(PlannerError::EmptyGraph);
        }

        let factory = factories
            .iter()
            .find(|f| f.backend() == self.backend)
            .ok_or_else(|| PlannerError::UnknownBackend {
                backend: self.backend.clone(),
            })?;

        let mut assignments = Vec::new();
        for id in graph.layers() {
            let layer = graph.layer(id).expect("live layer");
            if !layer.kind().is_compute() {
                continue;
            }

            let descriptor = QueueDescriptor::from_layer(graph, id)?;
            if !factory.is_supported(&descriptor) {
                return Err(PlannerError::NoBackend {
                    layer: layer.name().to_string(),
                    operation: layer.kind().as_str().to_string(),
                });
            }
            assignments.push(LayerAssignment {
                layer: id,
                layer_name: layer.name().to_string(),
                backend: self.backend.clone(),
            });
        }

        let plan = LoweringPlan {
            strategy_name: self.name().to_string(),
            assignments,
        };
        plan.validate(graph)?;
        Ok(plan)
    }
}
