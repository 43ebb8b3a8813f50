// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Folds chains of reshapes into a single reshape, or removes them
//! entirely when the chain ends where it started.

use super::single_input_info;
use crate::Optimization;
use graph_ir::{
    Graph, GraphError, InputSlotRef, LayerId, LayerKind, OutputSlotRef, ReshapeDescriptor,
};

/// Reshape → Reshape → … collapses to one reshape (or none).
///
/// Matches on the downstream reshape of a pair whose producer is a
/// reshape feeding nothing else. Longer chains collapse over the course
/// of one pass: each folded pair produces a fresh reshape that the next
/// chain member then folds with.
#[derive(Debug, Clone, Default)]
pub struct OptimizeConsecutiveReshapes;

impl Optimization for OptimizeConsecutiveReshapes {
    fn name(&self) -> &'static str {
        "consecutive-reshapes"
    }

    fn apply(&self, graph: &mut Graph, layer: LayerId) -> Result<bool, GraphError> {
        let Some(child) = graph.layer(layer) else {
            return Ok(false);
        };
        let LayerKind::Reshape(child_params) = child.kind() else {
            return Ok(false);
        };
        let target_shape = child_params.target_shape.clone();
        let child_name = child.name().to_string();

        let Some(parent_out) = graph.source_of(InputSlotRef::new(layer, 0)) else {
            return Ok(false);
        };
        let parent_id = parent_out.layer;
        let Some(parent) = graph.layer(parent_id) else {
            return Ok(false);
        };
        if !matches!(parent.kind(), LayerKind::Reshape(_)) {
            return Ok(false);
        }
        if graph.consumers_of(parent_out).len() != 1 {
            return Ok(false);
        }
        let Some((chain_source, chain_input_info)) = single_input_info(graph, parent_id) else {
            return Ok(false);
        };

        if chain_input_info.shape() == &target_shape {
            // The chain is shape-neutral: bypass and erase both layers.
            let consumers: Vec<InputSlotRef> =
                graph.consumers_of(OutputSlotRef::new(layer, 0)).to_vec();
            for consumer in consumers {
                graph.disconnect(consumer)?;
                graph.connect(chain_source, consumer)?;
            }
            graph.erase_layer(layer)?;
            graph.erase_layer(parent_id)?;
            return Ok(true);
        }

        // Fold the pair into one reshape straight to the final shape.
        let merged_info = chain_input_info.with_shape(target_shape.clone());
        let merged = graph.add_layer(
            LayerKind::Reshape(ReshapeDescriptor { target_shape }),
            &format!("{child_name}_folded"),
        );
        graph.set_tensor_info(OutputSlotRef::new(merged, 0), merged_info)?;
        graph.replace_layer(layer, merged)?;

        // The merged reshape inherited the parent as its producer; read
        // straight from the chain's input instead and drop the parent.
        graph.disconnect(InputSlotRef::new(merged, 0))?;
        graph.connect(chain_source, InputSlotRef::new(merged, 0))?;
        graph.erase_layer(parent_id)?;
        Ok(true)
    }
}
