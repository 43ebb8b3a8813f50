// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The network pipeline with type-state–enforced phases.
//!
//! ```text
//! Network<Constructed>
//!     │  .optimize()
//!     ▼
//! Network<Optimized>
//!     │  .prepare()
//!     ▼
//! Network<Ready>
//!     │  .run()
//!     ▼
//!   NetworkOutput
//! ```
//!
//! Each transition consumes the old value and returns a new one, making
//! invalid phase sequences a compile error: a graph cannot be lowered
//! before optimization, and a lowered network's graph is read-only.

use crate::{RunMetrics, RuntimeConfig, RuntimeError};
use backend_core::{QueueDescriptor, Workload};
use backend_planner::LoweringPlan;
use graph_ir::{Graph, InputSlotRef, LayerId, LayerKind, OutputSlotRef};
use graph_optimizer::{Optimizer, PassReport};
use std::collections::HashMap;
use std::time::Instant;
use tensor_core::{Tensor, TensorView};

// ── Type-state markers ─────────────────────────────────────────

/// Graph is populated but not yet optimized.
#[derive(Debug)]
pub struct Constructed;

/// Graph has been optimized and validated.
#[derive(Debug)]
pub struct Optimized;

/// Workloads are lowered; the network can execute.
#[derive(Debug)]
pub struct Ready;

/// Sealed trait for network states.
pub trait NetworkState: std::fmt::Debug {}
impl NetworkState for Constructed {}
impl NetworkState for Optimized {}
impl NetworkState for Ready {}

// ── Network output ─────────────────────────────────────────────

/// The result of a single network execution.
#[derive(Debug)]
pub struct NetworkOutput {
    /// One tensor per Output layer, in topological order.
    pub outputs: Vec<Tensor>,
    /// Per-workload and overall timing metrics.
    pub metrics: RunMetrics,
}

/// One lowered layer: the workload plus its provenance.
struct LoweredWorkload {
    layer: LayerId,
    layer_name: String,
    backend: String,
    workload: Box<dyn Workload>,
}

// ── Network ────────────────────────────────────────────────────

/// A network moving through the compile pipeline.
///
/// `S` is a type-state marker that enforces the phase ordering at
/// compile time. You cannot call `.run()` on a `Constructed` network or
/// `.optimize()` twice — the compiler catches it.
///
/// # Example
/// ```no_run
/// use runtime::{Network, RuntimeConfig};
/// # fn demo(graph: graph_ir::Graph, inputs: Vec<tensor_core::Tensor>) -> Result<(), runtime::RuntimeError> {
/// let network = Network::new(RuntimeConfig::default(), graph)
///     .optimize()?
///     .prepare()?;
/// let output = network.run(&inputs)?;
/// println!("{}", output.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Network<S: NetworkState = Constructed> {
    config: RuntimeConfig,
    graph: Graph,
    _state: std::marker::PhantomData<S>,
    // Fields populated as the network moves through phases:
    report: Option<PassReport>,
    plan: Option<LoweringPlan>,
    workloads: Option<Vec<LoweredWorkload>>,
}

// ── Constructed → Optimized ────────────────────────────────────

impl Network<Constructed> {
    /// Wraps a freshly constructed graph.
    pub fn new(config: RuntimeConfig, graph: Graph) -> Self {
        tracing::info!(
            "network created: {} layer(s), strategy '{}'",
            graph.num_layers(),
            config.strategy,
        );
        Self {
            config,
            graph,
            _state: std::marker::PhantomData,
            report: None,
            plan: None,
            workloads: None,
        }
    }

    /// Runs the default optimization catalog over the graph, then
    /// validates it. Transitions to the `Optimized` state.
    pub fn optimize(mut self) -> Result<Network<Optimized>, RuntimeError> {
        let optimizer = Optimizer::with_default_catalog();
        let report = optimizer.pass(&mut self.graph)?;
        self.graph.validate()?;

        Ok(Network {
            config: self.config,
            graph: self.graph,
            _state: std::marker::PhantomData,
            report: Some(report),
            plan: None,
            workloads: None,
        })
    }
}

// ── Optimized → Ready ──────────────────────────────────────────

impl Network<Optimized> {
    /// Returns the optimized graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the optimizer's pass report.
    pub fn pass_report(&self) -> &PassReport {
        self.report.as_ref().expect("report exists in Optimized state")
    }

    /// Assigns backends and lowers every compute layer to a workload.
    /// Transitions to the `Ready` state.
    pub fn prepare(self) -> Result<Network<Ready>, RuntimeError> {
        let factories = self.config.create_factories()?;
        let strategy = self.config.create_strategy()?;

        let plan = strategy.assign(&self.graph, &factories)?;
        tracing::info!("{}", plan.summary());

        let mut workloads = Vec::with_capacity(plan.num_assignments());
        for assignment in &plan.assignments {
            let descriptor = QueueDescriptor::from_layer(&self.graph, assignment.layer)?;
            let factory = factories
                .iter()
                .find(|f| f.backend() == assignment.backend)
                .ok_or_else(|| {
                    RuntimeError::ConfigError(format!(
                        "plan references unregistered backend '{}'",
                        assignment.backend,
                    ))
                })?;
            let workload = factory.create_workload(descriptor)?;
            tracing::debug!(
                "lowered '{}' to {} on '{}'",
                assignment.layer_name,
                workload.name(),
                assignment.backend,
            );
            workloads.push(LoweredWorkload {
                layer: assignment.layer,
                layer_name: assignment.layer_name.clone(),
                backend: assignment.backend.to_string(),
                workload,
            });
        }

        Ok(Network {
            config: self.config,
            graph: self.graph,
            _state: std::marker::PhantomData,
            report: self.report,
            plan: Some(plan),
            workloads: Some(workloads),
        })
    }
}

// ── Ready: run the network ─────────────────────────────────────

impl Network<Ready> {
    /// Returns the optimized graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the lowering plan.
    pub fn plan(&self) -> &LoweringPlan {
        self.plan.as_ref().expect("plan exists in Ready state")
    }

    /// Executes the network over the given input tensors (one per Input
    /// layer, in topological order).
    ///
    /// Allocates storage for every intermediate output slot, then
    /// invokes the lowered workloads in topological order, binding each
    /// one's producer storage. Repeated `run` calls are independent; the
    /// network itself is immutable here and may be shared across threads.
    pub fn run(&self, inputs: &[Tensor]) -> Result<NetworkOutput, RuntimeError> {
        let run_start = Instant::now();
        let workloads = self.workloads.as_ref().expect("workloads exist in Ready state");
        let profiling = self.config.enable_profiling;

        let input_layers: Vec<LayerId> = self
            .graph
            .layers()
            .into_iter()
            .filter(|&id| matches!(self.graph.layer(id).unwrap().kind(), LayerKind::Input))
            .collect();
        if inputs.len() != input_layers.len() {
            return Err(RuntimeError::InputCountMismatch {
                expected: input_layers.len(),
                actual: inputs.len(),
            });
        }

        // Bind caller storage to the Input layers' output slots.
        let mut storage: HashMap<OutputSlotRef, Tensor> = HashMap::new();
        for (index, (&id, tensor)) in input_layers.iter().zip(inputs).enumerate() {
            let slot = OutputSlotRef::new(id, 0);
            let expected = self.graph.output_info(slot).expect("validated graph");
            if expected != tensor.info() {
                return Err(RuntimeError::InputMismatch {
                    index,
                    expected: expected.to_string(),
                    actual: tensor.info().to_string(),
                });
            }
            storage.insert(slot, tensor.clone());
        }

        // Execute workloads in topological order.
        let mut metrics = RunMetrics::new();
        for lowered in workloads {
            let layer = self.graph.layer(lowered.layer).expect("validated graph");

            let mut outputs: Vec<Tensor> = (0..layer.num_outputs())
                .map(|j| {
                    let info = layer.output(j).and_then(|s| s.info()).expect("validated graph");
                    Tensor::zeros(info.clone())
                })
                .collect();

            let views: Vec<TensorView<'_>> = (0..layer.num_inputs())
                .map(|j| {
                    let source = self
                        .graph
                        .source_of(InputSlotRef::new(lowered.layer, j))
                        .expect("validated graph");
                    storage
                        .get(&source)
                        .expect("producer storage bound before consumer")
                        .view()
                })
                .collect();

            let workload_start = Instant::now();
            lowered.workload.execute(&views, &mut outputs)?;
            let duration = workload_start.elapsed();

            if profiling {
                metrics.record_workload(
                    lowered.layer_name.clone(),
                    lowered.workload.name().to_string(),
                    lowered.backend.clone(),
                    duration,
                );
            }

            for (j, tensor) in outputs.into_iter().enumerate() {
                storage.insert(OutputSlotRef::new(lowered.layer, j), tensor);
            }
        }

        // Collect the tensors feeding each Output layer.
        let mut results = Vec::new();
        for id in self.graph.layers() {
            if !matches!(self.graph.layer(id).unwrap().kind(), LayerKind::Output) {
                continue;
            }
            let source = self
                .graph
                .source_of(InputSlotRef::new(id, 0))
                .expect("validated graph");
            let tensor = storage
                .get(&source)
                .expect("output source storage bound")
                .clone();
            results.push(tensor);
        }

        metrics.finalise(run_start.elapsed());
        tracing::info!("{}", metrics.summary());

        Ok(NetworkOutput {
            outputs: results,
            metrics,
        })
    }
}

impl<S: NetworkState> std::fmt::Debug for Network<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("state", &std::any::type_name::<S>())
            .field("num_layers", &self.graph.num_layers())
            .field("has_plan", &self.plan.is_some())
            .field(
                "num_workloads",
                &self.workloads.as_ref().map(|w| w.len()).unwrap_or(0),
            )
            .finish()
    }
}
