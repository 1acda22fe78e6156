use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use radixtree::{Page, RadixTree};
use rand::{Rng, SeedableRng, prelude::SliceRandom, seq::IndexedRandom};
use rand_pcg::Pcg64;
use std::{collections::BTreeMap, hint::black_box};

// ============================================================================
// 1. Data Generators
// ============================================================================

const SIZES: [usize; 2] = [10_000, 100_000];

fn generate_urls(count: usize) -> Vec<String> {
  let mut rng = Pcg64::seed_from_u64(42);
  let domains = ["com", "org", "net", "io", "gov"];
  let paths = ["blog", "api", "app", "login", "user", "dashboard"];
  (0..count)
    .map(|_| {
      let dom = domains.choose(&mut rng).unwrap();
      let p1 = paths.choose(&mut rng).unwrap();
      let p2 = paths.choose(&mut rng).unwrap();
      let id: u32 = rng.random();
      format!("https://www.example.{}/{}/{}/{}", dom, p1, p2, id)
    })
    .collect()
}

fn shuffled(keys: &[String]) -> Vec<String> {
  let mut out = keys.to_vec();
  out.shuffle(&mut Pcg64::seed_from_u64(999));
  out
}

fn build_tree(keys: &[String]) -> RadixTree<u64> {
  let mut tree = RadixTree::new();
  for (i, k) in keys.iter().enumerate() {
    tree.insert(k, i as u64).unwrap();
  }
  tree
}

// ============================================================================
// 2. Benchmarks
// ============================================================================

fn bench_insert(c: &mut Criterion) {
  let mut group = c.benchmark_group("insert");
  for count in SIZES {
    let keys = generate_urls(count);
    group.throughput(Throughput::Elements(count as u64));

    group.bench_with_input(BenchmarkId::new("RadixTree", count), &keys, |b, keys| {
      b.iter(|| black_box(build_tree(keys)))
    });
    group.bench_with_input(BenchmarkId::new("BTreeMap", count), &keys, |b, keys| {
      b.iter(|| {
        let mut map = BTreeMap::new();
        for (i, k) in keys.iter().enumerate() {
          map.insert(k.clone(), i as u64);
        }
        black_box(map)
      })
    });
  }
  group.finish();
}

fn bench_get(c: &mut Criterion) {
  let mut group = c.benchmark_group("get");
  for count in SIZES {
    let keys = generate_urls(count);
    let search_keys = shuffled(&keys);
    let tree = build_tree(&keys);
    let map: BTreeMap<String, u64> = keys.iter().cloned().zip(0..).collect();
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function(BenchmarkId::new("RadixTree", count), |b| {
      b.iter(|| {
        for k in &search_keys {
          black_box(tree.get(k));
        }
      })
    });
    group.bench_function(BenchmarkId::new("BTreeMap", count), |b| {
      b.iter(|| {
        for k in &search_keys {
          black_box(map.get(k));
        }
      })
    });
  }
  group.finish();
}

fn bench_prefix_search(c: &mut Criterion) {
  let mut group = c.benchmark_group("prefix_search");
  let prefixes = [
    "https://www.example.io/",
    "https://www.example.com/api/",
    "https://www.example.org/user/login/",
  ];
  for count in SIZES {
    let keys = generate_urls(count);
    let tree = build_tree(&keys);
    let map: BTreeMap<String, u64> = keys.iter().cloned().zip(0..).collect();

    group.bench_function(BenchmarkId::new("RadixTree/all", count), |b| {
      b.iter(|| {
        for p in prefixes {
          black_box(tree.prefix_search(p, Page::ALL));
        }
      })
    });
    group.bench_function(BenchmarkId::new("RadixTree/page", count), |b| {
      b.iter(|| {
        for p in prefixes {
          black_box(tree.prefix_search(p, Page::new(50, 20)));
        }
      })
    });
    group.bench_function(BenchmarkId::new("BTreeMap/range", count), |b| {
      b.iter(|| {
        for p in prefixes {
          let hits: Vec<&u64> = map
            .range(p.to_string()..)
            .take_while(|(k, _)| k.starts_with(p))
            .map(|(_, v)| v)
            .collect();
          black_box(hits);
        }
      })
    });
  }
  group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_prefix_search);
criterion_main!(benches);
