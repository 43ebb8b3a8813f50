// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The built-in optimization catalog.
//!
//! All four rules elide or cheapen dimension-movement layers; none of
//! them changes the numeric result of the graph.

mod consecutive_reshapes;
mod inverse_transposes;
mod permute_as_reshape;
mod transpose_as_reshape;

pub use consecutive_reshapes::OptimizeConsecutiveReshapes;
pub use inverse_transposes::OptimizeInverseTransposes;
pub use permute_as_reshape::PermuteAsReshape;
pub use transpose_as_reshape::TransposeAsReshape;

use graph_ir::{Graph, InputSlotRef, LayerId, OutputSlotRef};
use tensor_core::TensorInfo;

/// Returns `true` if traversing the input axes in output order never
/// swaps two dimensions of size > 1.
///
/// `input_axis_by_output_axis[i]` names the input axis that lands in
/// output position `i`. When the relative order of all real (size > 1)
/// dimensions is preserved, the movement is a pure relabeling for
/// contiguous row-major storage and can be realized as a reshape.
pub(crate) fn moves_only_unit_dims(
    input_dims: &[usize],
    input_axis_by_output_axis: &[usize],
) -> bool {
    let mut last_real_axis = None;
    for &axis in input_axis_by_output_axis {
        if input_dims[axis] > 1 {
            if let Some(previous) = last_real_axis {
                if axis < previous {
                    return false;
                }
            }
            last_real_axis = Some(axis);
        }
    }
    true
}

/// Resolves the tensor info feeding `layer`'s single input, declining
/// (None) when the slot is unconnected or its info is unresolved.
pub(crate) fn single_input_info(graph: &Graph, layer: LayerId) -> Option<(OutputSlotRef, TensorInfo)> {
    let source = graph.source_of(InputSlotRef::new(layer, 0))?;
    let info = graph.output_info(source)?.clone();
    Some((source, info))
}
