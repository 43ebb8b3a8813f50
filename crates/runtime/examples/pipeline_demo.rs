// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: drive the full pipeline over a small movement-heavy graph.
//!
//! Demonstrates the core value proposition of the compiler: the
//! optimizer elides dimension-movement layers before lowering, and the
//! pass report plus related-layers table keep the rewrites auditable.
//!
//! ```bash
//! cargo run -p runtime --example pipeline_demo
//! ```

use graph_ir::{Graph, InputSlotRef, LayerKind, OutputSlotRef, TransposeDescriptor};
use runtime::{Network, RuntimeConfig};
use tensor_core::{DType, Permutation, Shape, Tensor, TensorInfo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Input (1,2,3,1) -> Transpose(0,3,1,2) -> Transpose(1,0) pattern:
    // the first transpose only moves unit dims and becomes a reshape;
    // the second moves real data and survives to execution.
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

    println!("Before optimization:\n{graph}");

    let optimized = Network::new(RuntimeConfig::default(), graph).optimize()?;
    println!("After optimization:\n{}", optimized.graph());
    println!("{}", optimized.pass_report().summary());
    if let Some(survivor) = optimized.graph().related_layer("unit_mover") {
        println!(
            "related layer: 'unit_mover' -> '{}'",
            optimized.graph().layer(survivor).map(|l| l.name()).unwrap_or("?"),
        );
    }

    let network = optimized.prepare()?;
    let input_tensor = Tensor::from_elems(
        TensorInfo::new(Shape::new(vec![1, 2, 3, 1]), DType::F32)?,
        &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0],
    )?;
    let result = network.run(&[input_tensor])?;

    println!(
        "output shape {} data {:?}",
        result.outputs[0].info().shape(),
        result.outputs[0].as_slice::<f32>(),
    );
    println!("{}", result.metrics.summary());
    Ok(())
}
