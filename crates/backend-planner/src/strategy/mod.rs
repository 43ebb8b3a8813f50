// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`AssignmentStrategy`] trait and strategy implementations.

pub mod preferred_order;
pub mod single_backend;

use crate::{LoweringPlan, PlannerError};
use backend_core::WorkloadFactory;
use graph_ir::Graph;

/// Trait for backend-assignment strategies.
///
/// Each strategy takes an optimized graph and the registered workload
/// factories, and produces a [`LoweringPlan`] mapping every compute
/// layer to a backend that can lower it.
///
/// Strategies are purely algorithmic — no I/O or system calls — making
/// them trivially unit-testable.
pub trait AssignmentStrategy: Send + Sync {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Produces a lowering plan for the given graph and factories.
    fn assign(
        &self,
        graph: &Graph,
        factories: &[Box<dyn WorkloadFactory>],
    ) -> Result<LoweringPlan, PlannerError>;
}
