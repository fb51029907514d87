//! Demo data seeding.
//!
//! Seeding is idempotent: accounts are looked up by email, the course by
//! name, and enrollments and grades by `(student, course)`. Running `seed`
//! twice leaves the database as the first run left it.

mod courses;
mod models;
mod users;

use std::time::Instant;

use gradebook_db::Store;
use gradebook_models::{Email, Role};

pub use courses::{ensure_course, ensure_enrollment, ensure_grade};
pub use models::{
    AccountSeed, DEMO_ACCOUNTS, DEMO_ADMIN, DEMO_COURSE, DEMO_MARKS, DEMO_STUDENT, DEMO_TEACHER,
    GENERATED_STUDENT_PASSWORD, SeedConfig, SeedSummary,
};
pub use users::{create_admin, ensure_user, generate_students};

/// Seeds the demo accounts, course, enrollment and grade, then any extra
/// fake students requested by `config`.
pub async fn seed_all(store: &dyn Store, config: &SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();

    println!("👥 Seeding demo accounts...");
    let mut seeded = Vec::with_capacity(DEMO_ACCOUNTS.len());
    for account in &DEMO_ACCOUNTS {
        let email = Email::new(account.email)?;
        let (user, created) = ensure_user(
            store,
            account.name,
            &email,
            account.password,
            account.role,
            config.password_cost,
        )
        .await?;
        summary.users_created += usize::from(created);
        seeded.push(user);
    }
    let (teacher, student) = (&seeded[1], &seeded[2]);

    println!("📚 Seeding course \"{}\"...", DEMO_COURSE);
    let (course, created) = ensure_course(store, DEMO_COURSE, teacher.id).await?;
    summary.courses_created += usize::from(created);

    let enrolled = ensure_enrollment(store, student.id, course.id).await?;
    summary.enrollments_created += usize::from(enrolled);

    let graded = ensure_grade(store, student.id, course.id, DEMO_MARKS).await?;
    summary.grades_created += usize::from(graded);

    if config.extra_students > 0 {
        println!(
            "🎓 Seeding {} generated students into \"{}\"...",
            config.extra_students, DEMO_COURSE
        );
        for (name, email) in generate_students(config.extra_students) {
            let (user, created) = ensure_user(
                store,
                &name,
                &email,
                GENERATED_STUDENT_PASSWORD,
                Role::Student,
                config.password_cost,
            )
            .await?;
            summary.users_created += usize::from(created);

            if user.role == Role::Student {
                let enrolled = ensure_enrollment(store, user.id, course.id).await?;
                summary.enrollments_created += usize::from(enrolled);
            }
        }
    }

    println!(
        "   ✓ {} users, {} courses, {} enrollments, {} grades inserted in {:?}",
        summary.users_created,
        summary.courses_created,
        summary.enrollments_created,
        summary.grades_created,
        start_time.elapsed()
    );

    Ok(summary)
}
