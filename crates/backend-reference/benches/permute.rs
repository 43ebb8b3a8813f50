// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the reference permute workload.

use backend_core::{QueueDescriptor, Workload};
use backend_reference::RefPermuteWorkload;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_ir::{LayerKind, PermuteDescriptor};
use tensor_core::{DType, Permutation, Shape, Tensor, TensorInfo};

fn permute_workload(dims: Vec<usize>, mapping: Vec<usize>) -> (RefPermuteWorkload<f32>, Tensor, Tensor) {
    let permutation = Permutation::new(mapping).unwrap();
    let input_info = TensorInfo::new(Shape::new(dims), DType::F32).unwrap();
    let output_info =
        input_info.with_shape(permutation.scatter_shape(input_info.shape()));

    let descriptor = QueueDescriptor {
        layer_name: "bench".into(),
        params: LayerKind::Permute(PermuteDescriptor { permutation }),
        inputs: vec![input_info.clone()],
        outputs: vec![output_info.clone()],
    };
    let workload = RefPermuteWorkload::<f32>::new(descriptor).unwrap();

    let values: Vec<f32> = (0..input_info.num_elements()).map(|v| v as f32).collect();
    let input = Tensor::from_elems(input_info, &values).unwrap();
    let output = Tensor::zeros(output_info);
    (workload, input, output)
}

fn bench_permute_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("ref_permute_f32");
    for &size in &[16usize, 64, 128] {
        let (workload, input, output) = permute_workload(vec![size, size, 8], vec![1, 0, 2]);
        let mut outputs = vec![output];
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                workload
                    .execute(&[input.view()], &mut outputs)
                    .expect("bench execute");
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_permute_f32);
criterion_main!(benches);
