// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `graph-rt optimize` command: show the optimizer at work.

use graph_optimizer::Optimizer;

pub fn execute() -> anyhow::Result<()> {
    let mut graph = super::demo_graph()?;

    println!("Before optimization:");
    println!("{graph}");

    let optimizer = Optimizer::with_default_catalog();
    println!("Catalog (offer order): {:?}", optimizer.rule_names());
    println!();

    let report = optimizer.pass(&mut graph)?;
    graph.validate()?;

    println!("After optimization:");
    println!("{graph}");
    println!("{}", report.summary());

    // Provenance: where did the rewritten layers go?
    for record in &report.rewrites {
        if let Some(survivor) = graph.related_layer(&record.layer) {
            let name = graph.layer(survivor).map(|l| l.name()).unwrap_or("?");
            println!("  '{}' now realized by '{name}' (rule: {})", record.layer, record.rule);
        }
    }
    Ok(())
}
