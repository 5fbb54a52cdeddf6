use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pathwise_core::level::classify;
use pathwise_core::model::{Answer, Level, Question};
use pathwise_core::recorder::AnswerRecorder;
use pathwise_core::scoring::score;

fn make_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            id: format!("q{i}"),
            text: String::new(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: if i % 4 == 0 {
                Answer::set(["a", "c"])
            } else {
                Answer::single("b")
            },
            difficulty: Level::ALL[i % 3],
            concept_tag: format!("concept-{}", i % 7),
            explanation: None,
        })
        .collect()
}

fn make_answers(questions: &[Question]) -> AnswerRecorder {
    questions
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 5 != 0)
        .map(|(i, q)| {
            let answer = if i % 2 == 0 {
                q.correct_answer.clone()
            } else {
                Answer::single("d")
            };
            (q.id.clone(), answer)
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for n in [10, 100, 1000] {
        let questions = make_questions(n);
        let answers = make_answers(&questions);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| score(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| {
            for s in 0..=100 {
                black_box(classify(black_box(f64::from(s))));
            }
        })
    });
}

criterion_group!(benches, bench_score, bench_classify);
criterion_main!(benches);
