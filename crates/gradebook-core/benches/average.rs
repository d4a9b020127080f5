use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::{Registry, User};

/// One course with `students` enrolled and `evaluations` graded for everyone.
fn make_registry(students: usize, evaluations: usize) -> Registry {
    let mut reg = Registry::new();
    reg.register_user(User::professor("p1", "Bench", "bench@uni.edu", "CS"))
        .unwrap();
    reg.create_course("Bench", "B1", "p1").unwrap();

    for i in 0..students {
        let id = format!("s{i}");
        reg.register_user(User::student(&id, "Student", "s@uni.edu", format!("n{i}")))
            .unwrap();
        reg.enroll_student("B1", &id).unwrap();
    }

    for e in 0..evaluations {
        let max_score = 10.0 * (e as f64 + 1.0);
        let eval_id = reg
            .create_evaluation("B1", "exam", "Bench", max_score, (e % 3 + 1) as f64)
            .unwrap()
            .id();
        for i in 0..students {
            let score = (i % 10) as f64 / 10.0 * max_score;
            reg.record_score("B1", eval_id, &format!("s{i}"), score)
                .unwrap();
        }
    }

    reg
}

fn bench_student_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("student_average");

    for evaluations in [5, 50, 500] {
        let reg = make_registry(10, evaluations);
        group.bench_function(format!("evaluations={evaluations}"), |b| {
            b.iter(|| reg.student_average(black_box("B1"), black_box("s3")))
        });
    }

    group.finish();
}

fn bench_low_performers(c: &mut Criterion) {
    let mut group = c.benchmark_group("low_performers");

    for students in [10, 100, 1000] {
        let reg = make_registry(students, 10);
        group.bench_function(format!("students={students}"), |b| {
            b.iter(|| reg.low_performers(black_box("B1"), black_box(60.0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_student_average, bench_low_performers);
criterion_main!(benches);
