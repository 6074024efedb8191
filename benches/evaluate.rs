//! Benchmarks evaluation over wide and nested requirement trees.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use eligibility::{AcademicProfile, CompletedCourse, Requirement, evaluate};

fn course(id: usize) -> Requirement {
    Requirement::Course {
        course_id: format!("course-{id}"),
        course_code: format!("1XX{id:03}"),
        course_title: format!("Course {id}"),
        label: None,
    }
}

/// A wide OR over many course alternatives, half of them completed.
fn wide_tree(width: usize) -> Requirement {
    Requirement::Or {
        children: (0..width).map(course).collect(),
        label: None,
    }
}

/// Alternating AND/OR groups up to the default depth ceiling.
fn nested_tree() -> Requirement {
    let mut tree = course(0);
    for level in 0..5 {
        let children = vec![tree, course(level + 1), course(level + 100)];
        tree = if level % 2 == 0 {
            Requirement::And {
                children,
                label: None,
            }
        } else {
            Requirement::Or {
                children,
                label: None,
            }
        };
    }
    tree
}

fn profile(courses: usize) -> AcademicProfile {
    AcademicProfile {
        completed_courses: (0..courses)
            .step_by(2)
            .map(|id| CompletedCourse {
                course_id: format!("course-{id}"),
                course_code: format!("1XX{id:03}"),
                credits: 7.5,
                ..CompletedCourse::default()
            })
            .collect(),
        total_credits: 120.0,
        ..AcademicProfile::default()
    }
}

fn evaluate_trees(c: &mut Criterion) {
    let wide = wide_tree(1_000);
    let nested = nested_tree();
    let profile = profile(1_000);

    c.bench_function("evaluate wide or", |b| {
        b.iter(|| evaluate(std::hint::black_box(&wide), std::hint::black_box(&profile)));
    });

    c.bench_function("evaluate nested groups", |b| {
        b.iter(|| evaluate(std::hint::black_box(&nested), std::hint::black_box(&profile)));
    });
}

criterion_group!(benches, evaluate_trees);
criterion_main!(benches);
