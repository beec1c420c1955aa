//! Benchmarks for catalog discovery and navigation building.

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tome_config::Config;
use tome_files::{FileCatalog, PathCodec};
use tome_nav::NavigationBuilder;

const EXCLUDE: [&str; 2] = [".*", "/templates"];

/// Create a docs tree with specified depth and breadth.
fn create_docs(root: &Path, depth: usize, breadth: usize) {
    fn create_level(dir: &Path, current_depth: usize, max_depth: usize, breadth: usize) {
        if current_depth > max_depth {
            return;
        }

        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("index.md"), format!("# Level {current_depth}\n")).unwrap();
        for i in 0..breadth {
            fs::write(dir.join(format!("page-{i}.md")), "# Page\n").unwrap();
        }

        for i in 0..breadth {
            let child_dir = dir.join(format!("section-{i}"));
            create_level(&child_dir, current_depth + 1, max_depth, breadth);
        }
    }

    create_level(root, 0, depth, breadth);
}

fn bench_discover(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let docs_dir = temp_dir.path().join("docs");
    let site_dir = temp_dir.path().join("site");
    create_docs(&docs_dir, 3, 4);

    c.bench_function("discover", |b| {
        b.iter(|| FileCatalog::discover(&docs_dir, &site_dir, true, &EXCLUDE).unwrap())
    });
}

fn bench_build_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_navigation");

    for (depth, breadth) in [(2, 3), (3, 4), (4, 4)] {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs_dir = temp_dir.path().join("docs");
        let site_dir = temp_dir.path().join("site");
        create_docs(&docs_dir, depth, breadth);
        let catalog = FileCatalog::discover(&docs_dir, &site_dir, true, &EXCLUDE).unwrap();
        let config = Config::default();

        group.bench_with_input(
            BenchmarkId::new("inferred", catalog.len()),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    let mut catalog = catalog.clone();
                    NavigationBuilder::new(&config).build(&mut catalog).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_relative_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("relative_url");

    group.bench_function("uncached", |b| {
        b.iter(|| tome_files::relative_url("section-0/section-1/page-2/", "section-2/page-0/"))
    });

    let codec = PathCodec::new();
    group.bench_function("cached", |b| {
        b.iter(|| codec.relative_url("section-0/section-1/page-2/", "section-2/page-0/"))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_discover,
    bench_build_navigation,
    bench_relative_url
);
criterion_main!(benches);
