use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use courtside_core::model::{AnswerOption, AssessmentForm, Question};
use courtside_core::submission::score_answers;

fn make_form(questions: usize, options: usize) -> AssessmentForm {
    let mut form = AssessmentForm::draft("Bench Form");
    form.code = Some("BENCH0".into());
    form.is_draft = false;
    for i in 0..questions {
        form.questions.push(Question {
            id: format!("q{i}"),
            section: "Bench".into(),
            prompt: format!("Question {i}"),
            prompt_alt: None,
            options: (0..options)
                .map(|o| AnswerOption::new(format!("Option {o}")))
                .collect(),
            correct_answer: "Option 0".into(),
        });
    }
    form
}

fn make_answers(questions: usize, correct: usize) -> BTreeMap<String, String> {
    (0..questions)
        .map(|i| {
            let selected = if i < correct { "Option 0" } else { "Option 1" };
            (format!("q{i}"), selected.to_string())
        })
        .collect()
}

fn bench_score_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_answers");

    group.bench_function("q=10,opts=4", |b| {
        let form = make_form(10, 4);
        let answers = make_answers(10, 7);
        b.iter(|| score_answers(black_box(&form), black_box(&answers)))
    });

    group.bench_function("q=100,opts=4", |b| {
        let form = make_form(100, 4);
        let answers = make_answers(100, 70);
        b.iter(|| score_answers(black_box(&form), black_box(&answers)))
    });

    group.bench_function("q=100,unanswered", |b| {
        let form = make_form(100, 4);
        let answers = BTreeMap::new();
        b.iter(|| score_answers(black_box(&form), black_box(&answers)))
    });

    group.finish();
}

fn bench_publish_issues(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_issues");

    group.bench_function("valid_q=50", |b| {
        let form = make_form(50, 4);
        b.iter(|| black_box(&form).publish_issues())
    });

    group.finish();
}

criterion_group!(benches, bench_score_answers, bench_publish_issues);
criterion_main!(benches);
