// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Execution profiling metrics.
//!
//! [`RunMetrics`] collects per-workload and aggregate timing for one
//! network execution. These are the primary tool for comparing backends
//! and for spotting layers the optimizer should have elided.

use std::time::Duration;

/// Metrics for a single workload's execution.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorkloadMetrics {
    /// Layer name the workload was lowered from.
    pub layer_name: String,
    /// Concrete workload name (e.g. `"RefPermuteFloat32Workload"`).
    pub workload_name: String,
    /// Backend that executed the workload.
    pub backend: String,
    /// Wall-clock execution time.
    pub duration: Duration,
}

/// Aggregate metrics for a complete network execution.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RunMetrics {
    /// Total wall-clock time for the run.
    pub total_duration: Duration,
    /// Sum of per-workload execution times.
    pub total_compute_duration: Duration,
    /// Per-workload metrics, in execution order.
    pub workload_metrics: Vec<WorkloadMetrics>,
}

impl RunMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records metrics for a single workload execution.
    pub fn record_workload(
        &mut self,
        layer_name: String,
        workload_name: String,
        backend: String,
        duration: Duration,
    ) {
        self.total_compute_duration += duration;
        self.workload_metrics.push(WorkloadMetrics {
            layer_name,
            workload_name,
            backend,
            duration,
        });
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Returns the number of workloads executed.
    pub fn num_workloads(&self) -> usize {
        self.workload_metrics.len()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Run: {:.3}ms total, {} workload(s), {:.3}ms compute",
            self.total_duration.as_secs_f64() * 1000.0,
            self.num_workloads(),
            self.total_compute_duration.as_secs_f64() * 1000.0,
        )
    }
}
