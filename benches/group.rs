use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rhymefetch_rs::{GroupKey, WordResult, group_by, group_by_syllables};

fn sample_words(len: usize) -> Vec<WordResult> {
    (0..len)
        .map(|i| {
            // Leave a few records without a count, like real service payloads.
            let count = if i % 17 == 0 {
                None
            } else {
                Some((i % 7 + 1) as u32)
            };
            WordResult::new(format!("word{i}"), count)
        })
        .collect()
}

fn bench_group_by(c: &mut Criterion) {
    for &len in &[16usize, 256, 4096] {
        let words = sample_words(len);
        c.bench_with_input(BenchmarkId::new("group_by_key", len), &words, |b, words| {
            b.iter(|| {
                let groups =
                    group_by(words.clone(), |word| GroupKey::from_count(word.num_syllables));
                black_box(groups.len());
            });
        });
    }
}

fn bench_group_by_syllables(c: &mut Criterion) {
    for &len in &[256usize, 4096] {
        let words = sample_words(len);
        c.bench_with_input(
            BenchmarkId::new("group_by_syllables", len),
            &words,
            |b, words| {
                b.iter(|| {
                    let groups = group_by_syllables(words.clone());
                    black_box(groups.len());
                });
            },
        );
    }
}

criterion_group!(benches, bench_group_by, bench_group_by_syllables);
criterion_main!(benches);
