// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full pipeline from graph construction through
//! optimization, backend assignment, lowering, and execution — proving
//! the crates compose and the type-state transitions work end-to-end.

use graph_ir::{
    Graph, InputSlotRef, LayerKind, OutputSlotRef, PermuteDescriptor, TransposeDescriptor,
};
use runtime::{Network, RuntimeConfig};
use tensor_core::{DType, Permutation, Shape, Tensor, TensorInfo};

// ── Helpers ────────────────────────────────────────────────────

fn f32_info(dims: Vec<usize>) -> TensorInfo {
    TensorInfo::new(Shape::new(dims), DType::F32).unwrap()
}

/// Builds Input -> <kind> -> Output with the given shapes resolved.
fn single_op_graph(kind: LayerKind, name: &str, in_dims: Vec<usize>, out_dims: Vec<usize>) -> Graph {
    let mut graph = Graph::new();
    let output = graph.add_layer(LayerKind::Output, "output");
    let input = graph
        .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
        .unwrap();
    graph
        .set_tensor_info(OutputSlotRef::new(input, 0), f32_info(in_dims))
        .unwrap();
    let op = graph
        .insert_new_layer(InputSlotRef::new(output, 0), kind, name)
        .unwrap();
    graph
        .set_tensor_info(OutputSlotRef::new(op, 0), f32_info(out_dims))
        .unwrap();
    graph
}

fn kind_sequence(graph: &Graph) -> Vec<&'static str> {
    graph.iter_layers().map(|l| l.kind().as_str()).collect()
}

// ── End-to-end scenarios ───────────────────────────────────────

#[test]
fn test_transpose_becomes_reshape_and_runs() {
    // A transpose that only moves unit dims: the optimizer rewrites it
    // to a reshape, and the executed result is the relabeled input.
    let graph = single_op_graph(
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![0, 3, 1, 2]).unwrap(),
        }),
        "transpose",
        vec![1, 2, 3, 1],
        vec![1, 1, 2, 3],
    );

    let optimized = Network::new(RuntimeConfig::default(), graph)
        .optimize()
        .unwrap();
    assert_eq!(
        kind_sequence(optimized.graph()),
        vec!["input", "reshape", "output"],
    );
    assert!(optimized.graph().related_layer("transpose").is_some());

    let network = optimized.prepare().unwrap();
    let values = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let input = Tensor::from_elems(f32_info(vec![1, 2, 3, 1]), &values).unwrap();
    let output = network.run(&[input]).unwrap();

    // Pure relabeling: same element order, new shape.
    assert_eq!(output.outputs[0].info().shape(), &Shape::new(vec![1, 1, 2, 3]));
    assert_eq!(output.outputs[0].as_slice::<f32>(), &values[..]);

    // The lowered workload is the reshape, not a transpose.
    assert_eq!(output.metrics.num_workloads(), 1);
    assert_eq!(
        output.metrics.workload_metrics[0].workload_name,
        "RefReshapeWorkload",
    );
}

#[test]
fn test_real_transpose_survives_and_moves_data() {
    let graph = single_op_graph(
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![1, 0]).unwrap(),
        }),
        "transpose",
        vec![2, 3],
        vec![3, 2],
    );

    let optimized = Network::new(RuntimeConfig::default(), graph)
        .optimize()
        .unwrap();
    assert_eq!(
        kind_sequence(optimized.graph()),
        vec!["input", "transpose", "output"],
    );

    let network = optimized.prepare().unwrap();
    let input =
        Tensor::from_elems(f32_info(vec![2, 3]), &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let output = network.run(&[input]).unwrap();
    assert_eq!(
        output.outputs[0].as_slice::<f32>(),
        &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0],
    );
}

#[test]
fn test_quantized_permute_pipeline() {
    let info_in = TensorInfo::quantized(Shape::matrix(2, 3), DType::QAsymmU8, 0.5, 128).unwrap();
    let info_out = TensorInfo::quantized(Shape::matrix(3, 2), DType::QAsymmU8, 0.5, 128).unwrap();

    let mut graph = Graph::new();
    let output = graph.add_layer(LayerKind::Output, "output");
    let input = graph
        .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
        .unwrap();
    graph
        .set_tensor_info(OutputSlotRef::new(input, 0), info_in.clone())
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
        .set_tensor_info(OutputSlotRef::new(permute, 0), info_out)
        .unwrap();

    let network = Network::new(RuntimeConfig::default(), graph)
        .optimize()
        .unwrap()
        .prepare()
        .unwrap();

    let input = Tensor::from_elems(info_in, &[1u8, 2, 3, 4, 5, 6]).unwrap();
    let result = network.run(&[input]).unwrap();

    assert_eq!(result.outputs[0].as_slice::<u8>(), &[1, 4, 2, 5, 3, 6]);
    // Quantization parameters pass through untouched.
    let q = result.outputs[0].info().quantization().unwrap();
    assert_eq!(q.scale, 0.5);
    assert_eq!(q.offset, 128);
}

#[test]
fn test_multiple_runs_are_independent() {
    let graph = single_op_graph(
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![1, 0]).unwrap(),
        }),
        "transpose",
        vec![2, 2],
        vec![2, 2],
    );
    let network = Network::new(RuntimeConfig::default(), graph)
        .optimize()
        .unwrap()
        .prepare()
        .unwrap();

    for round in 0..5 {
        let base = round as f32;
        let input = Tensor::from_elems(
            f32_info(vec![2, 2]),
            &[base, base + 1.0, base + 2.0, base + 3.0],
        )
        .unwrap();
        let output = network.run(&[input]).unwrap();
        assert_eq!(
            output.outputs[0].as_slice::<f32>(),
            &[base, base + 2.0, base + 1.0, base + 3.0],
        );
    }
}

#[test]
fn test_profiling_can_be_disabled() {
    let graph = single_op_graph(
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![1, 0]).unwrap(),
        }),
        "transpose",
        vec![2, 3],
        vec![3, 2],
    );
    let config = RuntimeConfig {
        enable_profiling: false,
        ..Default::default()
    };
    let network = Network::new(config, graph).optimize().unwrap().prepare().unwrap();
    let input = Tensor::zeros(f32_info(vec![2, 3]));
    let output = network.run(&[input]).unwrap();
    assert_eq!(output.metrics.num_workloads(), 0);
}

#[test]
fn test_config_from_toml_drives_pipeline() {
    let config = RuntimeConfig::from_toml(
        r#"
        backends = ["reference"]
        strategy = "single-backend"
        "#,
    )
    .unwrap();

    let graph = single_op_graph(
        LayerKind::Transpose(TransposeDescriptor {
            permutation: Permutation::new(vec![1, 0]).unwrap(),
        }),
        "transpose",
        vec![4, 5],
        vec![5, 4],
    );
    let network = Network::new(config, graph).optimize().unwrap().prepare().unwrap();
    assert_eq!(network.plan().strategy_name, "single-backend");
}

#[test]
fn test_unvalidatable_graph_fails_optimize() {
    // A graph whose input info was never resolved aborts the pipeline
    // at optimize() with a descriptive error.
    let mut graph = Graph::new();
    let output = graph.add_layer(LayerKind::Output, "output");
    graph
        .insert_new_layer(InputSlotRef::new(output, 0), LayerKind::Input, "input")
        .unwrap();

    let result = Network::new(RuntimeConfig::default(), graph).optimize();
    assert!(result.is_err());
}
