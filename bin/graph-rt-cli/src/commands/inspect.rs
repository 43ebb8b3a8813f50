// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `graph-rt inspect` command: display the graph structure.

use graph_ir::InputSlotRef;

pub fn execute(json: bool) -> anyhow::Result<()> {
    let graph = super::demo_graph()?;

    if json {
        let layers: Vec<serde_json::Value> = graph
            .layers()
            .into_iter()
            .map(|id| {
                let layer = graph.layer(id).expect("live layer");
                let info = layer
                    .output(0)
                    .and_then(|slot| slot.info())
                    .map(|i| i.to_string());
                serde_json::json!({
                    "name": layer.name(),
                    "kind": layer.kind().as_str(),
                    "output_info": info,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&layers)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              graph-rt · Graph Inspector              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("{graph}");

    // ── Connectivity detail ────────────────────────────────────
    println!("  {:<14} {:<12} {:<14} {:>10}", "Layer", "Kind", "Feeds from", "Consumers");
    println!("  {}", "-".repeat(54));
    for id in graph.layers() {
        let layer = graph.layer(id).expect("live layer");
        let source = graph
            .source_of(InputSlotRef::new(id, 0))
            .and_then(|s| graph.layer(s.layer))
            .map(|l| l.name().to_string())
            .unwrap_or_else(|| "-".to_string());
        let consumers = layer
            .output(0)
            .map(|slot| slot.consumers().len())
            .unwrap_or(0);
        println!(
            "  {:<14} {:<12} {:<14} {:>10}",
            layer.name(),
            layer.kind().as_str(),
            source,
            consumers,
        );
    }
    println!();
    Ok(())
}
