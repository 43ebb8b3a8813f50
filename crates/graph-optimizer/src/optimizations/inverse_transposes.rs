// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Removes adjacent transpose pairs that compose to the identity.

use crate::Optimization;
use graph_ir::{Graph, GraphError, InputSlotRef, LayerId, LayerKind, OutputSlotRef};

/// Transpose ∘ Transpose⁻¹ → nothing.
///
/// Matches on the downstream layer of the pair: a transpose whose sole
/// producer is another transpose with the inverse permutation, where the
/// producer feeds nothing else. Both layers are erased and every
/// consumer of the pair is rewired to the pair's original input.
#[derive(Debug, Clone, Default)]
pub struct OptimizeInverseTransposes;

impl Optimization for OptimizeInverseTransposes {
    fn name(&self) -> &'static str {
        "inverse-transposes"
    }

    fn apply(&self, graph: &mut Graph, layer: LayerId) -> Result<bool, GraphError> {
        let Some(child) = graph.layer(layer) else {
            return Ok(false);
        };
        let LayerKind::Transpose(child_params) = child.kind() else {
            return Ok(false);
        };
        let child_mapping = child_params.permutation.mapping().to_vec();

        let Some(parent_out) = graph.source_of(InputSlotRef::new(layer, 0)) else {
            return Ok(false);
        };
        let parent_id = parent_out.layer;
        let Some(parent) = graph.layer(parent_id) else {
            return Ok(false);
        };
        let LayerKind::Transpose(parent_params) = parent.kind() else {
            return Ok(false);
        };
        let parent_mapping = parent_params.permutation.mapping();

        // The pair must compose to the identity and be a private chain.
        if parent_mapping.len() != child_mapping.len() {
            return Ok(false);
        }
        let composes_to_identity = child_mapping
            .iter()
            .enumerate()
            .all(|(i, &c)| parent_mapping[c] == i);
        if !composes_to_identity {
            return Ok(false);
        }
        if graph.consumers_of(parent_out).len() != 1 {
            return Ok(false);
        }
        let Some(pair_source) = graph.source_of(InputSlotRef::new(parent_id, 0)) else {
            return Ok(false);
        };

        // Rewire every consumer of the pair past both transposes, then
        // erase child and parent (now consumer-free).
        let consumers: Vec<InputSlotRef> =
            graph.consumers_of(OutputSlotRef::new(layer, 0)).to_vec();
        for consumer in consumers {
            graph.disconnect(consumer)?;
            graph.connect(pair_source, consumer)?;
        }
        graph.erase_layer(layer)?;
        graph.erase_layer(parent_id)?;
        Ok(true)
    }
}
