#[macro_use]
extern crate criterion;

use criterion::Criterion;

use packhund_core::alloc::PacketAllocator;

fn bench_packet_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_alloc_throughput");

    for size in [188, 1500, 65536] {
        group.throughput(criterion::Throughput::Bytes(size as u64));
        group.bench_function(format!("from_bytes_{}", size), |b| {
            let allocator = PacketAllocator::new();
            let payload = vec![0x47u8; size];
            b.iter(|| {
                let packet = allocator.packet_from_bytes(&payload).unwrap();
                allocator.release(packet);
            });
        });

        group.bench_function(format!("duplicate_{}", size), |b| {
            let allocator = PacketAllocator::new();
            let payload = vec![0x47u8; size];
            let source = allocator.packet_from_bytes(&payload).unwrap();
            b.iter(|| {
                let copy = allocator.duplicate(&source).unwrap();
                allocator.release(copy);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_packet_lifecycle);
criterion_main!(benches);
