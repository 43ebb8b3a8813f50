// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # backend-core
//!
//! The contract between the graph compiler and its compute backends:
//!
//! - [`QueueDescriptor`] — the lowering-time capture of one layer's
//!   parameters and resolved slot descriptors.
//! - [`Workload`] — a backend- and dtype-specialized executable unit.
//! - [`WorkloadFactory`] — per-backend catalog that validates a
//!   descriptor and instantiates the matching typed workload.
//! - [`BackendId`] — names a compute target for assignment and
//!   diagnostics.
//!
//! Backends implement these traits (see `backend-reference` for the CPU
//! reference backend); the planner and runtime consume them without
//! knowing any concrete backend.

mod descriptor;
mod error;
mod factory;
mod workload;

pub use descriptor::QueueDescriptor;
pub use error::WorkloadError;
pub use factory::{BackendId, WorkloadFactory};
pub use workload::Workload;
