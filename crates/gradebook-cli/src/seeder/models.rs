//! Seed data and seeding configuration.

use gradebook_core::DEFAULT_PASSWORD_COST;
use gradebook_models::Role;

/// A fixed account created by `seed`.
pub struct AccountSeed {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const DEMO_ADMIN: AccountSeed = AccountSeed {
    name: "Dr. Vikram Sharma (HOD)",
    email: "hod.cse@university.edu.in",
    password: "admin123",
    role: Role::Admin,
};

pub const DEMO_TEACHER: AccountSeed = AccountSeed {
    name: "Prof. Anjali Desai",
    email: "anjali.desai@university.edu.in",
    password: "teacher123",
    role: Role::Teacher,
};

pub const DEMO_STUDENT: AccountSeed = AccountSeed {
    name: "Rahul Verma",
    email: "rahul.verma@student.edu.in",
    password: "student123",
    role: Role::Student,
};

pub const DEMO_ACCOUNTS: [AccountSeed; 3] = [DEMO_ADMIN, DEMO_TEACHER, DEMO_STUDENT];

pub const DEMO_COURSE: &str = "Data Structures and Algorithms";

pub const DEMO_MARKS: f64 = 85.5;

/// Password shared by every generated student.
pub const GENERATED_STUDENT_PASSWORD: &str = "student123";

#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// Fake students to generate and enroll in the demo course.
    pub extra_students: usize,
    pub password_cost: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            extra_students: 0,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }
}

impl SeedConfig {
    pub fn with_students(mut self, extra_students: usize) -> Self {
        self.extra_students = extra_students;
        self
    }

    pub fn with_password_cost(mut self, password_cost: u32) -> Self {
        self.password_cost = password_cost;
        self
    }
}

/// What a seeding run actually inserted. Rows that already existed are not
/// counted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_created: usize,
    pub courses_created: usize,
    pub enrollments_created: usize,
    pub grades_created: usize,
}
