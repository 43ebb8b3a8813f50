// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! The pipeline that turns a constructed graph into results:
//!
//! - Optimize the graph in place (`graph-optimizer`) and validate it.
//! - Assign every compute layer to a backend (`backend-planner`).
//! - Lower each assigned layer to a typed workload via its backend's
//!   factory (`backend-core` / `backend-reference`).
//! - Execute the workloads in topological order, routing tensors
//!   between slots.
//!
//! # Type-State Pipeline
//! The pipeline is enforced at compile time:
//! ```text
//! Network<Constructed> → Network<Optimized> → Network<Ready>
//! ```
//! Transitions consume the network, so a lowered graph can never be
//! mutated and phases can never run out of order.

mod config;
mod engine;
mod error;
mod metrics;

pub use config::RuntimeConfig;
pub use engine::{Constructed, Network, NetworkOutput, NetworkState, Optimized, Ready};
pub use error::RuntimeError;
pub use metrics::{RunMetrics, WorkloadMetrics};
