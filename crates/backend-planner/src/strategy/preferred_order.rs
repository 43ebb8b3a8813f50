// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Preferred-order assignment strategy.
//!
//! Walks the graph in topological order and gives each compute layer to
//! the first registered factory (in the given registration order) whose
//! capability query accepts the layer's descriptor. The registration
//! order therefore encodes backend preference: put accelerated backends
//! first and the reference backend last as the always-available fallback.

use crate::plan::{LayerAssignment, LoweringPlan};
use crate::strategy::AssignmentStrategy;
use crate::PlannerError;
use backend_core::{QueueDescriptor, WorkloadFactory};
use graph_ir::Graph;

/// First supporting factory in registration order wins.
#[derive(Debug, Clone, Default)]
pub struct PreferredOrder;

impl PreferredOrder {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentStrategy for PreferredOrder {
    fn name(&self) -> &str {
        "preferred-order"
    }

    fn assign(
        &self,
        graph: &Graph,
        factories: &[Box<dyn WorkloadFactory>],
    ) -> Result<LoweringPlan, PlannerError> {
        if graph.num_layers() == 0 {
            return Err(PlannerError::EmptyGraph);
        }

        let mut assignments = Vec::new();
        for id in graph.layers() {
            let layer = graph.layer(id).expect("live layer");
            if !layer.kind().is_compute() {
                continue;
            }

            let descriptor = QueueDescriptor::from_layer(graph, id)?;
            let supported = factories
                .iter()
                .find(|factory| factory.is_supported(&descriptor));
            match supported {
                Some(factory) => {
                    tracing::debug!(
                        "layer '{}' ({}) -> backend '{}'",
                        layer.name(),
                        layer.kind(),
                        factory.backend(),
                    );
                    assignments.push(LayerAssignment {
                        layer: id,
                        layer_name: layer.name().to_string(),
                        backend: factory.backend(),
                    });
                }
                None => {
                    return Err(PlannerError::NoBackend {
                        layer: layer.name().to_string(),
                        operation: layer.kind().as_str().to_string(),
                    })
                }
            }
        }

        let plan = LoweringPlan {
            strategy_name: self.name().to_string(),
            assignments,
        };
        plan.validate(graph)?;
        Ok(plan)
    }
}
