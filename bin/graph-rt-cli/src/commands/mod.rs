// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI subcommands and shared fixtures.

pub mod inspect;
pub mod optimize;
pub mod run;

use graph_ir::{Graph, InputSlotRef, LayerKind, OutputSlotRef, TransposeDescriptor};
use tensor_core::{DType, Permutation, Shape, TensorInfo};

/// Initialises tracing based on `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the demonstration graph used by every subcommand:
///
/// ```text
/// input (1,2,3,1) -> unit_mover (transpose 0,3,1,2) -> swap (transpose 1,0 on flattened dims) -> output
/// ```
///
/// The first transpose only moves unit dimensions and is optimized into
/// a reshape; the second reorders real data and survives to execution.
pub(crate) fn demo_graph() -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    let output = graph.add_layer(LayerKind::Output, "output");
    let input = graph.insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")?;
    graph.set_tensor_info(
        OutputSlotRef::new(input, 0),
        TensorInfo::new(Shape::new(vec![1, 2, 3, 1]), DType::F32)?,
    )?;

    let unit_mover = graph.insert_new_layer(
        InputSlotRef::new(output, 0),
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![0, 3, 1, 2])?,
        }),
        "unit_mover",
    )?;
    graph.set_tensor_info(
        OutputSlotRef::new(unit_mover, 0),
        TensorInfo::new(Shape::new(vec![1, 1, 2, 3]), DType::F32)?,
    )?;

    let swap = graph.insert_new_layer(
        InputSlotRef::new(output, 0),
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![0, 1, 3, 2])?,
        }),
        "swap",
    )?;
    graph.set_tensor_info(
        OutputSlotRef::new(swap, 0),
        TensorInfo::new(Shape::new(vec![1, 1, 3, 2]), DType::F32)?,
    )?;

    Ok(graph)
}
