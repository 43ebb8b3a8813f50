// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Optimization`] capability and the [`Optimizer`] driver.

use graph_ir::{Graph, GraphError, LayerId};

/// A local pattern-match-and-rewrite rule.
///
/// Given a layer, an optimization decides whether it matches a
/// structural/parametric pattern and, if so, rewrites the graph in place
/// around that layer. Declining to match is the normal outcome for most
/// (rule, layer) pairs and is `Ok(false)`, never an error.
pub trait Optimization: Send + Sync {
    /// Short rule name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Offers `layer` to this rule; returns whether a rewrite fired.
    fn apply(&self, graph: &mut Graph, layer: LayerId) -> Result<bool, GraphError>;
}

/// One rewrite performed during a pass.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RewriteRecord {
    /// The rule that fired.
    pub rule: &'static str,
    /// Debug name of the layer the rewrite was rooted at.
    pub layer: String,
}

/// Summary of a single optimizer pass.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PassReport {
    /// The rewrites performed, in traversal order.
    pub rewrites: Vec<RewriteRecord>,
}

impl PassReport {
    /// Returns the number of rewrites performed.
    pub fn num_rewrites(&self) -> usize {
        self.rewrites.len()
    }

    /// Returns `true` if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.rewrites.is_empty()
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        if self.is_noop() {
            return "Optimizer pass: no rewrites".to_string();
        }
        let rules: Vec<String> = self
            .rewrites
            .iter()
            .map(|r| format!("{}('{}')", r.rule, r.layer))
            .collect();
        format!(
            "Optimizer pass: {} rewrite(s): {}",
            self.num_rewrites(),
            rules.join(", "),
        )
    }
}

/// Applies an ordered catalog of [`Optimization`]s to a graph.
///
/// A pass is a single linear traversal over a snapshot of the
/// topological order taken at entry. Each surviving layer is offered to
/// every rule in catalog order; the first match triggers its rewrite and
/// the traversal moves on. Layers created by a rewrite get fresh handles
/// that are absent from the snapshot, so they are not re-offered within
/// the same pass — complementary rules cannot ping-pong.
pub struct Optimizer {
    catalog: Vec<Box<dyn Optimization>>,
}

impl Optimizer {
    /// Creates a driver over an explicit rule catalog.
    pub fn new(catalog: Vec<Box<dyn Optimization>>) -> Self {
        Self { catalog }
    }

    /// Creates a driver over the built-in movement-elision catalog:
    /// inverse-transpose removal, consecutive-reshape folding, then the
    /// transpose/permute-as-reshape rewrites.
    pub fn with_default_catalog() -> Self {
        use crate::optimizations::{
            OptimizeConsecutiveReshapes, OptimizeInverseTransposes, PermuteAsReshape,
            TransposeAsReshape,
        };
        Self::new(vec![
            Box::new(OptimizeInverseTransposes),
            Box::new(OptimizeConsecutiveReshapes),
            Box::new(TransposeAsReshape),
            Box::new(PermuteAsReshape),
        ])
    }

    /// Returns the names of the catalog rules, in offer order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.catalog.iter().map(|rule| rule.name()).collect()
    }

    /// Runs one pass over `graph`.
    ///
    /// Running a second pass over an already-optimized graph is a no-op;
    /// the rules are written to reach their fixpoint in one traversal.
    pub fn pass(&self, graph: &mut Graph) -> Result<PassReport, GraphError> {
        let snapshot = graph.layers();
        let mut report = PassReport::default();

        for id in snapshot {
            // The layer may have been consumed by an earlier rewrite.
            let Some(layer) = graph.layer(id) else {
                continue;
            };
            let layer_name = layer.name().to_string();

            for rule in &self.catalog {
                if rule.apply(graph, id)? {
                    tracing::debug!(
                        "rule '{}' rewrote layer '{}'",
                        rule.name(),
                        layer_name,
                    );
                    report.rewrites.push(RewriteRecord {
                        rule: rule.name(),
                        layer: layer_name,
                    });
                    break;
                }
            }
        }

        tracing::info!("{}", report.summary());
        Ok(report)
    }
}

impl std::fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optimizer")
            .field("catalog", &self.rule_names())
            .finish()
    }
}
