// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `graph-rt run` command: compile and execute the demonstration graph.

use runtime::{Network, RuntimeConfig};
use std::path::PathBuf;
use tensor_core::{DType, Shape, Tensor, TensorInfo};

pub fn execute(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => RuntimeConfig::from_file(&path)?,
        None => RuntimeConfig::default(),
    };
    tracing::info!("backends: {:?}, strategy: {}", config.backends, config.strategy);

    let graph = super::demo_graph()?;
    let optimized = Network::new(config, graph).optimize()?;
    println!("{}", optimized.pass_report().summary());

    let network = optimized.prepare()?;
    println!("{}", network.plan().summary());

    let input = Tensor::from_elems(
        TensorInfo::new(Shape::new(vec![1, 2, 3, 1]), DType::F32)?,
        &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0],
    )?;
    let result = network.run(&[input])?;

    println!(
        "output: {} {:?}",
        result.outputs[0].info(),
        result.outputs[0].as_slice::<f32>(),
    );
    println!("{}", result.metrics.summary());
    Ok(())
}
