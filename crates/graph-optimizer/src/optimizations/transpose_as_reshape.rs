// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rewrites transposes that only move size-1 dimensions into reshapes.
//!
//! A permutation that never swaps two dimensions of size > 1 does not
//! change the memory layout of a contiguous row-major tensor, so the
//! transpose can be realized by relabeling the shape instead of moving
//! data — strictly cheaper at execution time.

use super::{moves_only_unit_dims, single_input_info};
use crate::Optimization;
use graph_ir::{Graph, GraphError, LayerId, LayerKind, OutputSlotRef, ReshapeDescriptor};

/// Transpose → Reshape, when the permutation preserves the relative
/// order of all real dimensions.
#[derive(Debug, Clone, Default)]
pub struct TransposeAsReshape;

impl Optimization for TransposeAsReshape {
    fn name(&self) -> &'static str {
        "transpose-as-reshape"
    }

    fn apply(&self, graph: &mut Graph, layer: LayerId) -> Result<bool, GraphError> {
        let Some(candidate) = graph.layer(layer) else {
            return Ok(false);
        };
        let LayerKind::Transpose(params) = candidate.kind() else {
            return Ok(false);
        };
        let permutation = params.permutation.clone();
        let layer_name = candidate.name().to_string();
        let resolved_output = candidate.output(0).and_then(|slot| slot.info()).cloned();

        let Some((_, input_info)) = single_input_info(graph, layer) else {
            return Ok(false);
        };
        if permutation.rank() != input_info.shape().rank() {
            return Ok(false);
        }
        // Gather semantics: output position i holds input axis perm[i].
        if !moves_only_unit_dims(input_info.shape().dims(), permutation.mapping()) {
            return Ok(false);
        }

        let target_shape = match &resolved_output {
            Some(info) => info.shape().clone(),
            None => permutation.gather_shape(input_info.shape()),
        };
        let reshape_info = input_info.with_shape(target_shape.clone());

        let reshape = graph.add_layer(
            LayerKind::Reshape(ReshapeDescriptor { target_shape }),
            &format!("{layer_name}_as_reshape"),
        );
        graph.set_tensor_info(OutputSlotRef::new(reshape, 0), reshape_info)?;
        graph.replace_layer(layer, reshape)?;
        Ok(true)
    }
}
