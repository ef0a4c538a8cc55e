use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indoc::indoc;
use srpatch::{parse_blocks, Patcher};

// --- Parsing Benchmarks ---

fn parsing_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parsing");

    // Simple, single-block diff
    let simple_diff = indoc! {r#"
        Some narration from the model.
        <<<<<<< SEARCH
        :start_line:2
        -------
            println!("Hello, world!");
        =======
            println!("Hello, srpatch!");
        >>>>>>> REPLACE
    "#};
    group.bench_function("simple_diff", |b| {
        b.iter(|| parse_blocks(black_box(simple_diff)))
    });

    // Diff with many blocks
    let mut many_blocks = String::new();
    for i in 0..100 {
        many_blocks.push_str(&format!(
            "<<<<<<< SEARCH\n:start_line:{}\n-------\nold line {}\n=======\nnew line {}\n>>>>>>> REPLACE\n",
            i * 5 + 1,
            i,
            i
        ));
    }
    group.bench_function("many_blocks_100", |b| {
        b.iter(|| parse_blocks(black_box(&many_blocks)))
    });

    // Large prose with one block at the end to test scanning speed
    let mut large_prose = "Lorem ipsum dolor sit amet...\n".repeat(1000);
    large_prose.push_str(simple_diff);
    group.bench_function("large_prose_scan", |b| {
        b.iter(|| parse_blocks(black_box(&large_prose)))
    });

    group.finish();
}

// --- Applying Benchmarks ---

fn applying_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Applying");

    let mut large_file_content = String::new();
    for i in 0..10000 {
        large_file_content.push_str(&format!("This is line number {}\n", i));
    }

    // --- Benchmark 1: Hinted exact match on a large file ---
    let hinted_diff = indoc! {r#"
        <<<<<<< SEARCH
        :start_line:5001
        -------
        This is line number 5000
        =======
        THIS LINE WAS CHANGED
        >>>>>>> REPLACE
    "#};
    let patcher = Patcher::default();
    group.bench_function("hinted_match_large_file", |b| {
        b.iter(|| {
            black_box(patcher.apply(black_box(&large_file_content), black_box(hinted_diff)))
        });
    });

    // --- Benchmark 2: Unhinted match forces a full middle-out scan ---
    let unhinted_diff = indoc! {r#"
        <<<<<<< SEARCH
        -------
        This is line number 5000
        =======
        THIS LINE WAS CHANGED
        >>>>>>> REPLACE
    "#};
    group.bench_function("unhinted_match_large_file", |b| {
        b.iter(|| {
            black_box(patcher.apply(black_box(&large_file_content), black_box(unhinted_diff)))
        });
    });

    // --- Benchmark 3: Worst case, no match anywhere (full scan, all misses) ---
    let missing_diff = indoc! {r#"
        <<<<<<< SEARCH
        -------
        this text appears nowhere in the file
        =======
        irrelevant
        >>>>>>> REPLACE
    "#};
    group.bench_function("worst_case_no_match", |b| {
        b.iter(|| {
            // Expected to fail; we are measuring the search.
            black_box(patcher.apply(black_box(&large_file_content), black_box(missing_diff)))
        });
    });

    // --- Benchmark 4: Multi-line span matching ---
    let multiline_diff = indoc! {r#"
        <<<<<<< SEARCH
        :start_line:4999
        -------
        This is line number 4998
        This is line number 4999
        This is line number 5000
        =======
        This is line number 4998
        REPLACED MIDDLE LINE
        This is line number 5000
        >>>>>>> REPLACE
    "#};
    group.bench_function("hinted_multiline_span", |b| {
        b.iter(|| {
            black_box(patcher.apply(black_box(&large_file_content), black_box(multiline_diff)))
        });
    });

    group.finish();
}

criterion_group!(benches, parsing_benches, applying_benches);
criterion_main!(benches);
