// Benchmarks the resolver over a recursive ancestor query.

use criterion::{criterion_group, criterion_main, Criterion};

use sherlog::*;

static PROGRAM: &str = "
    parent(p0, p1). parent(p1, p2). parent(p2, p3). parent(p3, p4).
    parent(p4, p5). parent(p5, p6). parent(p6, p7). parent(p7, p8).
    parent(p8, p9). parent(p9, p10). parent(p10, p11). parent(p11, p12).
    ancestor(?x, ?y) :- parent(?x, ?y).
    ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
";

fn ancestor_closure(kb: &KnowledgeBase) -> usize {
    kb.query_str("ancestor(?a, ?d)", QueryOptions::default())
      .unwrap()
      .count()
}

fn criterion_benchmark(c: &mut Criterion) {
    let kb = KnowledgeBase::new();
    load_str(&kb, PROGRAM).unwrap();

    // 12 parent facts give 78 ancestor pairs.
    assert_eq!(78, ancestor_closure(&kb));

    c.bench_function("ancestor closure", |b| {
        b.iter(|| ancestor_closure(&kb))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
