// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The mutable computation graph.
//!
//! Layers live in an arena addressed by stable [`LayerId`] handles, with
//! a separately materialized topological order. Handle-based addressing
//! is what lets the optimizer rewrite the structure it is traversing:
//! a snapshot of the order taken before a pass stays valid as handles,
//! and handles to removed layers simply stop resolving.
//!
//! Every mutator upholds two invariants on return:
//! - each connected input has exactly one upstream output, and that
//!   output's layer precedes the consumer in iteration order;
//! - on failure the graph is observably unchanged (no partial mutation).

use crate::{GraphError, InputSlotRef, Layer, LayerId, LayerKind, OutputSlotRef};
use std::collections::{HashMap, HashSet};
use tensor_core::TensorInfo;

/// An ordered, topologically consistent collection of layers.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    layers: Vec<Option<Layer>>,
    order: Vec<LayerId>,
    related: HashMap<String, LayerId>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Returns the number of live layers.
    pub fn num_layers(&self) -> usize {
        self.order.len()
    }

    /// Returns a layer by handle, or `None` if it has been removed.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns the handles of all live layers in topological order,
    /// materialized as of this call.
    pub fn layers(&self) -> Vec<LayerId> {
        self.order.clone()
    }

    /// Iterates over live layers in topological order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &Layer> {
        self.order
            .iter()
            .filter_map(|id| self.layers[id.0].as_ref())
    }

    /// Finds a live layer by its debug name.
    pub fn find_layer(&self, name: &str) -> Option<LayerId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.layers[id.0].as_ref().is_some_and(|l| l.name == name))
    }

    /// Looks up the surviving layer recorded for a rewritten layer's
    /// debug name, if any rewrite replaced it.
    pub fn related_layer(&self, name: &str) -> Option<LayerId> {
        self.related.get(name).copied()
    }

    /// Returns the upstream output feeding `input`, if connected.
    pub fn source_of(&self, input: InputSlotRef) -> Option<OutputSlotRef> {
        self.layer(input.layer)?.input(input.index)?.source()
    }

    /// Returns the consumers of `output`.
    pub fn consumers_of(&self, output: OutputSlotRef) -> &[InputSlotRef] {
        self.layer(output.layer)
            .and_then(|l| l.output(output.index))
            .map(|slot| slot.consumers())
            .unwrap_or(&[])
    }

    /// Returns the resolved tensor descriptor of `output`, if set.
    pub fn output_info(&self, output: OutputSlotRef) -> Option<&TensorInfo> {
        self.layer(output.layer)?.output(output.index)?.info()
    }

    // ── Construction ───────────────────────────────────────────────

    /// Appends a new, fully disconnected layer at the end of the current
    /// order and returns its stable handle.
    pub fn add_layer(&mut self, kind: LayerKind, name: &str) -> LayerId {
        let id = LayerId(self.layers.len());
        self.layers.push(Some(Layer::new(kind, name)));
        self.order.push(id);
        id
    }

    /// Wires `from` into `to`.
    ///
    /// If the producer currently appears after the consumer, the order is
    /// restored by a stable topological re-sort; a connection that would
    /// create a cycle is rolled back and reported.
    ///
    /// # Errors
    /// [`GraphError::AlreadyConnected`] if `to` has an upstream;
    /// [`GraphError::CycleDetected`] if the edge closes a cycle.
    pub fn connect(&mut self, from: OutputSlotRef, to: InputSlotRef) -> Result<(), GraphError> {
        let from_name = self.check_output(from)?.to_string();
        let to_name = self.check_input(to)?.to_string();

        if from.layer == to.layer {
            return Err(GraphError::CycleDetected {
                from: from_name,
                to: to_name,
            });
        }
        if self.layer(to.layer).unwrap().inputs[to.index].source.is_some() {
            return Err(GraphError::AlreadyConnected {
                layer: to_name,
                index: to.index,
            });
        }

        self.wire(from, to);

        let from_pos = self.position(from.layer);
        let to_pos = self.position(to.layer);
        if from_pos > to_pos && self.restore_topological_order().is_err() {
            self.unwire(to);
            return Err(GraphError::CycleDetected {
                from: from_name,
                to: to_name,
            });
        }
        Ok(())
    }

    /// Severs the edge feeding `to` and returns the former source.
    ///
    /// # Errors
    /// [`GraphError::NotConnected`] if `to` has no upstream.
    pub fn disconnect(&mut self, to: InputSlotRef) -> Result<OutputSlotRef, GraphError> {
        let to_name = self.check_input(to)?.to_string();
        let source = self
            .layer(to.layer)
            .unwrap()
            .inputs[to.index]
            .source
            .ok_or(GraphError::NotConnected {
                layer: to_name,
                index: to.index,
            })?;
        self.unwire(to);
        Ok(source)
    }

    /// Creates a new layer and splices it between the output currently
    /// feeding `target` and `target` itself.
    ///
    /// The new layer's input takes over the previous upstream, and its
    /// output becomes the new source of `target`. Used both for normal
    /// construction (inserting an Input layer ahead of a consumer) and
    /// for optimization rewrites.
    ///
    /// # Errors
    /// [`GraphError::InvalidInsertion`] unless `kind` is 1-in/1-out —
    /// except for [`LayerKind::Input`], which is allowed and leaves the
    /// previous-upstream side vacant;
    /// [`GraphError::NotConnected`] if `target` has no upstream and
    /// `kind` is not an Input layer.
    pub fn insert_new_layer(
        &mut self,
        target: InputSlotRef,
        kind: LayerKind,
        name: &str,
    ) -> Result<LayerId, GraphError> {
        let target_name = self.check_input(target)?.to_string();

        let (num_in, num_out) = kind.arity();
        if num_out != 1 || num_in > 1 {
            return Err(GraphError::InvalidInsertion {
                kind: kind.as_str().to_string(),
            });
        }

        let previous = self.layer(target.layer).unwrap().inputs[target.index].source;
        if num_in == 1 && previous.is_none() {
            return Err(GraphError::NotConnected {
                layer: target_name,
                index: target.index,
            });
        }
        if num_in == 0 && previous.is_some() {
            // A source layer cannot be spliced into a live edge; that
            // would orphan the current producer.
            return Err(GraphError::AlreadyConnected {
                layer: target_name,
                index: target.index,
            });
        }

        let id = LayerId(self.layers.len());
        self.layers.push(Some(Layer::new(kind, name)));
        let target_pos = self.position(target.layer);
        self.order.insert(target_pos, id);

        if let Some(previous) = previous {
            self.unwire(target);
            self.wire(previous, InputSlotRef::new(id, 0));
        }
        self.wire(OutputSlotRef::new(id, 0), target);
        Ok(id)
    }

    /// Rewires every consumer of `old`'s outputs to the corresponding
    /// output of `new` (by slot index), moves `new` into `old`'s
    /// topological position, hands `old`'s upstream connections to `new`,
    /// and removes `old`.
    ///
    /// The replacement is recorded in the related-layers table under
    /// `old`'s debug name, so provenance survives optimization.
    ///
    /// # Errors
    /// [`GraphError::ReplacementMismatch`] if arities differ or `new` is
    /// not fully disconnected.
    pub fn replace_layer(&mut self, old: LayerId, new: LayerId) -> Result<(), GraphError> {
        let old_layer = self.layers.get(old.0).and_then(|s| s.as_ref());
        let new_layer = self.layers.get(new.0).and_then(|s| s.as_ref());
        let (old_layer, new_layer) = match (old_layer, new_layer) {
            (Some(o), Some(n)) => (o, n),
            (None, _) => return Err(GraphError::UnknownLayer(old)),
            (_, None) => return Err(GraphError::UnknownLayer(new)),
        };
        let old_name = old_layer.name.clone();
        let new_name = new_layer.name.clone();

        if old == new {
            return Err(GraphError::ReplacementMismatch {
                old: old_name,
                new: new_name,
                detail: "a layer cannot replace itself".into(),
            });
        }
        if old_layer.inputs.len() != new_layer.inputs.len()
            || old_layer.outputs.len() != new_layer.outputs.len()
        {
            return Err(GraphError::ReplacementMismatch {
                old: old_name,
                new: new_name,
                detail: format!(
                    "arity mismatch: {}in/{}out vs {}in/{}out",
                    old_layer.inputs.len(),
                    old_layer.outputs.len(),
                    new_layer.inputs.len(),
                    new_layer.outputs.len(),
                ),
            });
        }
        let disconnected = new_layer.inputs.iter().all(|i| i.source.is_none())
            && new_layer.outputs.iter().all(|o| o.consumers.is_empty());
        if !disconnected {
            return Err(GraphError::ReplacementMismatch {
                old: old_name,
                new: new_name,
                detail: "replacement layer must be fully disconnected".into(),
            });
        }

        // Hand over upstream connections.
        for index in 0..self.layers[old.0].as_ref().unwrap().inputs.len() {
            if let Some(src) = self.layers[old.0].as_ref().unwrap().inputs[index].source {
                self.unwire(InputSlotRef::new(old, index));
                self.wire(src, InputSlotRef::new(new, index));
            }
        }

        // Move consumers over, output slot by output slot.
        let num_outputs = self.layers[old.0].as_ref().unwrap().outputs.len();
        for index in 0..num_outputs {
            let consumers =
                std::mem::take(&mut self.layers[old.0].as_mut().unwrap().outputs[index].consumers);
            for consumer in &consumers {
                self.layers[consumer.layer.0].as_mut().unwrap().inputs[consumer.index].source =
                    Some(OutputSlotRef::new(new, index));
            }
            self.layers[new.0].as_mut().unwrap().outputs[index].consumers = consumers;
        }

        // `new` takes over `old`'s topological position.
        let new_pos = self.position(new);
        self.order.remove(new_pos);
        let old_pos = self.position(old);
        self.order[old_pos] = new;
        self.layers[old.0] = None;

        // Keep provenance: old name maps to the survivor, and any earlier
        // entries that pointed at `old` follow it.
        for target in self.related.values_mut() {
            if *target == old {
                *target = new;
            }
        }
        self.related.insert(old_name.clone(), new);

        tracing::debug!("replaced layer '{old_name}' with '{new_name}'");
        Ok(())
    }

    /// Removes a layer whose outputs no longer feed anything, detaching
    /// its inputs.
    ///
    /// # Errors
    /// [`GraphError::LayerInUse`] if any output still has a consumer —
    /// live edges are never silently dropped.
    pub fn erase_layer(&mut self, id: LayerId) -> Result<(), GraphError> {
        let layer = self
            .layers
            .get(id.0)
            .and_then(|s| s.as_ref())
            .ok_or(GraphError::UnknownLayer(id))?;
        let name = layer.name.clone();

        let live_consumers: usize = layer.outputs.iter().map(|o| o.consumers.len()).sum();
        if live_consumers > 0 {
            return Err(GraphError::LayerInUse {
                layer: name,
                consumers: live_consumers,
            });
        }

        for index in 0..self.layers[id.0].as_ref().unwrap().inputs.len() {
            if self.layers[id.0].as_ref().unwrap().inputs[index].source.is_some() {
                self.unwire(InputSlotRef::new(id, index));
            }
        }

        let pos = self.position(id);
        self.order.remove(pos);
        self.layers[id.0] = None;
        self.related.retain(|_, target| *target != id);

        tracing::debug!("erased layer '{name}'");
        Ok(())
    }

    /// Sets the tensor descriptor of an output slot.
    ///
    /// # Errors
    /// [`GraphError::InfoFrozen`] when replacing a descriptor that
    /// downstream consumers have already observed — mutating it then
    /// would silently invalidate shape inference performed by consumers.
    pub fn set_tensor_info(
        &mut self,
        output: OutputSlotRef,
        info: TensorInfo,
    ) -> Result<(), GraphError> {
        let name = self.check_output(output)?.to_string();
        let slot = &mut self.layers[output.layer.0].as_mut().unwrap().outputs[output.index];
        if slot.info.is_some() && !slot.consumers.is_empty() {
            return Err(GraphError::InfoFrozen {
                layer: name,
                index: output.index,
            });
        }
        slot.info = Some(info);
        Ok(())
    }

    // ── Whole-graph validation ─────────────────────────────────────

    /// Checks the invariants required before lowering:
    /// every input connected, every output resolved and consumed, at
    /// least one Input and one Output layer, and producer-before-consumer
    /// ordering.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut has_input = false;
        let mut has_output = false;

        for (pos, &id) in self.order.iter().enumerate() {
            let layer = self
                .layer(id)
                .ok_or_else(|| GraphError::InvalidGraph(format!("stale handle {id:?} in order")))?;
            match layer.kind {
                LayerKind::Input => has_input = true,
                LayerKind::Output => has_output = true,
                _ => {}
            }

            for (index, input) in layer.inputs.iter().enumerate() {
                let source = input.source.ok_or_else(|| {
                    GraphError::InvalidGraph(format!(
                        "input slot {index} of layer '{}' is not connected",
                        layer.name,
                    ))
                })?;
                let src_pos = self.order.iter().position(|&o| o == source.layer);
                match src_pos {
                    Some(src_pos) if src_pos < pos => {}
                    _ => {
                        return Err(GraphError::InvalidGraph(format!(
                            "producer of layer '{}' does not precede it",
                            layer.name,
                        )))
                    }
                }
            }

            for (index, output) in layer.outputs.iter().enumerate() {
                if output.info.is_none() {
                    return Err(GraphError::InvalidGraph(format!(
                        "output slot {index} of layer '{}' has no tensor info",
                        layer.name,
                    )));
                }
                if output.consumers.is_empty() {
                    return Err(GraphError::InvalidGraph(format!(
                        "output slot {index} of layer '{}' is dangling",
                        layer.name,
                    )));
                }
            }
        }

        if !has_input {
            return Err(GraphError::InvalidGraph("graph has no Input layer".into()));
        }
        if !has_output {
            return Err(GraphError::InvalidGraph("graph has no Output layer".into()));
        }
        Ok(())
    }

    // ── Private helpers ────────────────────────────────────────────

    fn check_input(&self, slot: InputSlotRef) -> Result<&str, GraphError> {
        let layer = self
            .layer(slot.layer)
            .ok_or(GraphError::UnknownLayer(slot.layer))?;
        if slot.index >= layer.inputs.len() {
            return Err(GraphError::SlotOutOfRange {
                layer: layer.name.clone(),
                slot_kind: "input",
                index: slot.index,
            });
        }
        Ok(&layer.name)
    }

    fn check_output(&self, slot: OutputSlotRef) -> Result<&str, GraphError> {
        let layer = self
            .layer(slot.layer)
            .ok_or(GraphError::UnknownLayer(slot.layer))?;
        if slot.index >= layer.outputs.len() {
            return Err(GraphError::SlotOutOfRange {
                layer: layer.name.clone(),
                slot_kind: "output",
                index: slot.index,
            });
        }
        Ok(&layer.name)
    }

    /// Wires an edge. Callers have already validated both ends.
    fn wire(&mut self, from: OutputSlotRef, to: InputSlotRef) {
        self.layers[to.layer.0].as_mut().unwrap().inputs[to.index].source = Some(from);
        self.layers[from.layer.0].as_mut().unwrap().outputs[from.index]
            .consumers
            .push(to);
    }

    /// Severs the edge feeding `to`. Callers have verified it exists.
    fn unwire(&mut self, to: InputSlotRef) {
        let source = self.layers[to.layer.0].as_mut().unwrap().inputs[to.index]
            .source
            .take()
            .expect("unwire called on unconnected slot");
        self.layers[source.layer.0].as_mut().unwrap().outputs[source.index]
            .consumers
            .retain(|c| *c != to);
    }

    fn position(&self, id: LayerId) -> usize {
        self.order
            .iter()
            .position(|&o| o == id)
            .expect("live layer must appear in order")
    }

    /// Stable topological re-sort: repeatedly takes the earliest layer
    /// (in the current order) whose producers are all placed. Fails when
    /// no layer can be placed, which means a cycle.
    fn restore_topological_order(&mut self) -> Result<(), GraphError> {
        let mut remaining = self.order.clone();
        let mut placed: HashSet<LayerId> = HashSet::new();
        let mut result = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let ready = remaining.iter().position(|&id| {
                self.layers[id.0]
                    .as_ref()
                    .expect("live layer")
                    .inputs
                    .iter()
                    .all(|input| match input.source {
                        None => true,
                        Some(src) => placed.contains(&src.layer),
                    })
            });
            match ready {
                Some(pos) => {
                    let id = remaining.remove(pos);
                    placed.insert(id);
                    result.push(id);
                }
                None => {
                    return Err(GraphError::InvalidGraph(
                        "graph contains a cycle".into(),
                    ))
                }
            }
        }

        self.order = result;
        Ok(())
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph ({} layers):", self.num_layers())?;
        for layer in self.iter_layers() {
            writeln!(f, "  {}", layer.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PermuteDescriptor, ReshapeDescriptor, TransposeDescriptor};
    use tensor_core::{DType, Permutation, Shape};

    fn f32_info(dims: Vec<usize>) -> TensorInfo {
        TensorInfo::new(Shape::new(dims), DType::F32).unwrap()
    }

    fn transpose_kind(mapping: Vec<usize>) -> LayerKind {
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(mapping).unwrap(),
        })
    }

    fn reshape_kind(dims: Vec<usize>) -> LayerKind {
        LayerKind::Reshape(ReshapeDescriptor {
            target_shape: Shape::new(dims),
        })
    }

    /// Builds Input -> Transpose -> Output the way a parser would: the
    /// Output layer first, then splicing layers ahead of its input.
    fn linear_graph() -> (Graph, LayerId, LayerId, LayerId) {
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let input = graph
            .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
            .unwrap();
        graph
            .set_tensor_info(OutputSlotRef::new(input, 0), f32_info(vec![1, 2, 3, 1]))
            .unwrap();
        let transpose = graph
            .insert_new_layer(
                InputSlotRef::new(output, 0),
                transpose_kind(vec![0, 3, 1, 2]),
                "transpose",
            )
            .unwrap();
        graph
            .set_tensor_info(OutputSlotRef::new(transpose, 0), f32_info(vec![1, 1, 2, 3]))
            .unwrap();
        (graph, input, transpose, output)
    }

    fn layer_names(graph: &Graph) -> Vec<String> {
        graph.iter_layers().map(|l| l.name().to_string()).collect()
    }

    #[test]
    fn test_build_linear_graph() {
        let (graph, input, transpose, output) = linear_graph();
        assert_eq!(layer_names(&graph), vec!["input", "transpose", "output"]);
        assert_eq!(
            graph.source_of(InputSlotRef::new(transpose, 0)),
            Some(OutputSlotRef::new(input, 0)),
        );
        assert_eq!(
            graph.source_of(InputSlotRef::new(output, 0)),
            Some(OutputSlotRef::new(transpose, 0)),
        );
        graph.validate().unwrap();
    }

    #[test]
    fn test_insert_input_layer_on_unconnected_slot() {
        // An Input layer (0-in/1-out) may be spliced ahead of a slot with
        // no upstream; anything with an input side may not.
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let result = graph.insert_new_layer(
            InputSlotRef::new(output, 0),
            transpose_kind(vec![0, 1]),
            "transpose",
        );
        assert!(matches!(result, Err(GraphError::NotConnected { .. })));

        let input = graph
            .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
            .unwrap();
        assert_eq!(
            graph.source_of(InputSlotRef::new(output, 0)),
            Some(OutputSlotRef::new(input, 0)),
        );
    }

    #[test]
    fn test_insert_rejects_output_kind() {
        let (mut graph, _, _, output) = linear_graph();
        let result =
            graph.insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Output, "out2");
        assert!(matches!(result, Err(GraphError::InvalidInsertion { .. })));
    }

    #[test]
    fn test_failed_insert_leaves_graph_unchanged() {
        let (mut graph, _, transpose, output) = linear_graph();
        let before = layer_names(&graph);
        let src_before = graph.source_of(InputSlotRef::new(output, 0));

        let result =
            graph.insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Output, "bad");
        assert!(result.is_err());
        assert_eq!(layer_names(&graph), before);
        assert_eq!(graph.source_of(InputSlotRef::new(output, 0)), src_before);
        assert_eq!(graph.consumers_of(OutputSlotRef::new(transpose, 0)).len(), 1);
    }

    #[test]
    fn test_connect_rejects_double_connection() {
        let (mut graph, input, _, output) = linear_graph();
        let result = graph.connect(
            OutputSlotRef::new(input, 0),
            InputSlotRef::new(output, 0),
        );
        assert!(matches!(result, Err(GraphError::AlreadyConnected { .. })));
    }

    #[test]
    fn test_connect_reorders_late_producer() {
        // Adding a producer after its consumer must still yield a valid
        // topological order once connected.
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let input = graph.add_layer(LayerKind::Input, "input");
        assert_eq!(layer_names(&graph), vec!["output", "input"]);

        graph
            .connect(OutputSlotRef::new(input, 0), InputSlotRef::new(output, 0))
            .unwrap();
        assert_eq!(layer_names(&graph), vec!["input", "output"]);
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let mut graph = Graph::new();
        let transpose = graph.add_layer(transpose_kind(vec![0, 1]), "t");
        let result = graph.connect(
            OutputSlotRef::new(transpose, 0),
            InputSlotRef::new(transpose, 0),
        );
        assert!(matches!(result, Err(GraphError::CycleDetected { .. })));
        assert!(graph.source_of(InputSlotRef::new(transpose, 0)).is_none());
    }

    #[test]
    fn test_replace_layer_rewires_and_records_provenance() {
        let (mut graph, input, transpose, output) = linear_graph();
        let reshape = graph.add_layer(reshape_kind(vec![1, 1, 2, 3]), "reshape");
        graph
            .set_tensor_info(OutputSlotRef::new(reshape, 0), f32_info(vec![1, 1, 2, 3]))
            .unwrap();

        graph.replace_layer(transpose, reshape).unwrap();

        assert_eq!(layer_names(&graph), vec!["input", "reshape", "output"]);
        assert_eq!(
            graph.source_of(InputSlotRef::new(output, 0)),
            Some(OutputSlotRef::new(reshape, 0)),
        );
        assert_eq!(
            graph.source_of(InputSlotRef::new(reshape, 0)),
            Some(OutputSlotRef::new(input, 0)),
        );
        assert!(graph.layer(transpose).is_none());
        assert_eq!(graph.related_layer("transpose"), Some(reshape));
        graph.validate().unwrap();
    }

    #[test]
    fn test_replace_chains_provenance() {
        let (mut graph, _, transpose, _) = linear_graph();
        let first = graph.add_layer(reshape_kind(vec![1, 1, 2, 3]), "reshape_a");
        graph
            .set_tensor_info(OutputSlotRef::new(first, 0), f32_info(vec![1, 1, 2, 3]))
            .unwrap();
        graph.replace_layer(transpose, first).unwrap();

        let second = graph.add_layer(reshape_kind(vec![1, 1, 2, 3]), "reshape_b");
        graph
            .set_tensor_info(OutputSlotRef::new(second, 0), f32_info(vec![1, 1, 2, 3]))
            .unwrap();
        graph.replace_layer(first, second).unwrap();

        // Both the original transpose and the intermediate reshape now
        // resolve to the final survivor.
        assert_eq!(graph.related_layer("transpose"), Some(second));
        assert_eq!(graph.related_layer("reshape_a"), Some(second));
    }

    #[test]
    fn test_replace_rejects_arity_mismatch() {
        let (mut graph, _, transpose, _) = linear_graph();
        let bad = graph.add_layer(LayerKind::Input, "bad");
        let result = graph.replace_layer(transpose, bad);
        assert!(matches!(result, Err(GraphError::ReplacementMismatch { .. })));
        // Old layer untouched.
        assert!(graph.layer(transpose).is_some());
    }

    #[test]
    fn test_replace_rejects_connected_replacement() {
        let (mut graph, _, transpose, output) = linear_graph();
        let other = graph.add_layer(reshape_kind(vec![1, 1, 2, 3]), "other");
        // Wire `other` somewhere first.
        graph.disconnect(InputSlotRef::new(output, 0)).unwrap();
        graph
            .connect(OutputSlotRef::new(other, 0), InputSlotRef::new(output, 0))
            .unwrap();
        let result = graph.replace_layer(transpose, other);
        assert!(matches!(result, Err(GraphError::ReplacementMismatch { .. })));
    }

    #[test]
    fn test_erase_rejects_layer_with_consumers() {
        let (mut graph, _, transpose, _) = linear_graph();
        let result = graph.erase_layer(transpose);
        assert!(matches!(result, Err(GraphError::LayerInUse { .. })));
        assert!(graph.layer(transpose).is_some());
    }

    #[test]
    fn test_erase_after_rewiring() {
        let (mut graph, input, transpose, output) = linear_graph();
        // Bypass the transpose, then erase it.
        graph.disconnect(InputSlotRef::new(output, 0)).unwrap();
        graph
            .connect(OutputSlotRef::new(input, 0), InputSlotRef::new(output, 0))
            .unwrap();
        graph.erase_layer(transpose).unwrap();

        assert_eq!(layer_names(&graph), vec!["input", "output"]);
        assert_eq!(graph.consumers_of(OutputSlotRef::new(input, 0)).len(), 1);
    }

    #[test]
    fn test_set_tensor_info_frozen_after_consumption() {
        let (mut graph, input, _, _) = linear_graph();
        // The input's info is set and the transpose consumes it.
        let result =
            graph.set_tensor_info(OutputSlotRef::new(input, 0), f32_info(vec![4, 4]));
        assert!(matches!(result, Err(GraphError::InfoFrozen { .. })));
    }

    #[test]
    fn test_validate_rejects_dangling_output() {
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let input = graph
            .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
            .unwrap();
        graph
            .set_tensor_info(OutputSlotRef::new(input, 0), f32_info(vec![2, 2]))
            .unwrap();
        // A second input whose output feeds nothing.
        let dangling = graph.add_layer(LayerKind::Input, "dangling");
        graph
            .set_tensor_info(OutputSlotRef::new(dangling, 0), f32_info(vec![2, 2]))
            .unwrap();
        assert!(matches!(graph.validate(), Err(GraphError::InvalidGraph(_))));
    }

    #[test]
    fn test_validate_rejects_missing_info() {
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let _input = graph
            .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
            .unwrap();
        assert!(matches!(graph.validate(), Err(GraphError::InvalidGraph(_))));
    }

    #[test]
    fn test_topological_invariant_holds_after_mutation() {
        let (mut graph, _, transpose, _) = linear_graph();
        let reshape = graph.add_layer(reshape_kind(vec![1, 1, 2, 3]), "reshape");
        graph
            .set_tensor_info(OutputSlotRef::new(reshape, 0), f32_info(vec![1, 1, 2, 3]))
            .unwrap();
        graph.replace_layer(transpose, reshape).unwrap();

        let order = graph.layers();
        for (pos, &id) in order.iter().enumerate() {
            let layer = graph.layer(id).unwrap();
            for index in 0..layer.num_inputs() {
                let src = graph.source_of(InputSlotRef::new(id, index)).unwrap();
                let src_pos = order.iter().position(|&o| o == src.layer).unwrap();
                assert!(src_pos < pos, "producer must precede consumer");
            }
        }
    }

    #[test]
    fn test_display_lists_layers() {
        let (graph, _, _, _) = linear_graph();
        let rendered = format!("{graph}");
        assert!(rendered.contains("input"));
        assert!(rendered.contains("transpose"));
        assert!(rendered.contains("output"));
    }

    #[test]
    fn test_permute_kind_in_graph() {
        let mut graph = Graph::new();
        let output = graph.add_layer(LayerKind::Output, "output");
        let input = graph
            .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
            .unwrap();
        graph
            .set_tensor_info(OutputSlotRef::new(input, 0), f32_info(vec![2, 3]))
            .unwrap();
        let permute = graph
            .insert_new_layer(
                InputSlotRef::new(output, 0),
                LayerKind::Permute(PermuteDescriptor {
                    permutation: Permutation::new(vec![1, 0]).unwrap(),
                }),
                "permute",
            )
            .unwrap();
        graph
            .set_tensor_info(OutputSlotRef::new(permute, 0), f32_info(vec![3, 2]))
            .unwrap();
        graph.validate().unwrap();
    }
}
