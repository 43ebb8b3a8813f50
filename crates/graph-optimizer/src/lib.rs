// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-optimizer
//!
//! The semantics-preserving rewrite framework for the graph IR.
//!
//! - [`Optimization`] — one local pattern-match-and-rewrite rule.
//! - [`Optimizer`] — offers every layer to an ordered rule catalog in a
//!   single linear traversal; first match wins, rewritten layers are not
//!   re-offered within the pass.
//! - [`optimizations`] — the built-in movement-elision catalog.
//!
//! Rewrites record provenance in the graph's related-layers table
//! (original debug name → surviving layer), queryable through
//! [`graph_ir::Graph::related_layer`] for diagnostics.

pub mod optimizations;
mod optimizer;

pub use optimizer::{Optimization, Optimizer, PassReport, RewriteRecord};
