//! Grade records, letter derivation, statistics and GPA.

use crate::courses::CourseSummary;
use crate::ids::{CourseId, GradeId, UserId};
use crate::value_types::ValueTypeError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;

/// Letter grade. Variant order is the reporting order, A first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum GradeLetter {
    A,
    B,
    C,
    D,
    F,
}

impl GradeLetter {
    /// Derives the letter from marks: >=90 A, >=80 B, >=70 C, >=60 D, else F.
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            GradeLetter::A
        } else if marks >= 80.0 {
            GradeLetter::B
        } else if marks >= 70.0 {
            GradeLetter::C
        } else if marks >= 60.0 {
            GradeLetter::D
        } else {
            GradeLetter::F
        }
    }

    /// Grade points on the 4.0 scale.
    pub fn points(&self) -> f64 {
        match self {
            GradeLetter::A => 4.0,
            GradeLetter::B => 3.0,
            GradeLetter::C => 2.0,
            GradeLetter::D => 1.0,
            GradeLetter::F => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::F => "F",
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLetter {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(GradeLetter::A),
            "B" => Ok(GradeLetter::B),
            "C" => Ok(GradeLetter::C),
            "D" => Ok(GradeLetter::D),
            "F" => Ok(GradeLetter::F),
            other => Err(ValueTypeError::UnknownGradeLetter(other.to_string())),
        }
    }
}

impl_text_column!(GradeLetter);

/// Returns `true` when `marks` is a real number inside `[0, 100]`.
pub fn marks_in_range(marks: f64) -> bool {
    marks.is_finite() && (MIN_MARKS..=MAX_MARKS).contains(&marks)
}

/// A student's grade in one course. `(student_id, course_id)` is unique and
/// always backed by an enrollment.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Grade {
    pub id: GradeId,
    pub student_id: UserId,
    pub course_id: CourseId,
    pub marks: f64,
    pub grade_letter: GradeLetter,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Grade as shown to the student, with the course inlined.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GradeWithCourse {
    pub id: GradeId,
    pub course: CourseSummary,
    pub marks: f64,
    pub grade_letter: GradeLetter,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Marks are range-checked by the grading service after the ownership check,
/// so a non-owner always sees 403 first.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct GradeInputDto {
    pub student_id: UserId,
    pub course_id: CourseId,
    pub marks: f64,
}

/// Insert-or-update payload for the store; the letter is already derived.
#[derive(Debug, Clone)]
pub struct GradeUpsert {
    pub student_id: UserId,
    pub course_id: CourseId,
    pub marks: f64,
    pub grade_letter: GradeLetter,
}

impl GradeUpsert {
    pub fn new(student_id: UserId, course_id: CourseId, marks: f64) -> Self {
        Self {
            student_id,
            course_id,
            marks,
            grade_letter: GradeLetter::from_marks(marks),
        }
    }
}

/// Whether an upsert inserted a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeOutcome {
    Created,
    Updated,
}

impl GradeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeOutcome::Created => "created",
            GradeOutcome::Updated => "updated",
        }
    }
}

/// Number of grades with a given letter in one course.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct GradeStat {
    pub grade_letter: GradeLetter,
    pub count: i64,
}

/// Mean grade points over `letters`, `0.0` when there are none.
pub fn compute_gpa(letters: &[GradeLetter]) -> f64 {
    if letters.is_empty() {
        return 0.0;
    }
    let total: f64 = letters.iter().map(GradeLetter::points).sum();
    total / letters.len() as f64
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GpaSummary {
    pub gpa: f64,
    /// Absent when the student has no grades yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses_count: Option<usize>,
}

impl GpaSummary {
    pub fn from_letters(letters: &[GradeLetter]) -> Self {
        Self {
            gpa: compute_gpa(letters),
            courses_count: (!letters.is_empty()).then_some(letters.len()),
        }
    }
}
