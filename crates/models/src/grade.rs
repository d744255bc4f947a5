use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;
use utoipa::ToSchema;

/// Weight of the assignment component in the final score
pub const ASSIGNMENT_WEIGHT: f64 = 0.30;
/// Weight of the midterm component in the final score
pub const MIDTERM_WEIGHT: f64 = 0.30;
/// Weight of the final exam component in the final score
pub const FINAL_EXAM_WEIGHT: f64 = 0.40;

/// Lowest and highest valid component score
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Decimal places kept in a final score
const SCORE_DECIMALS: u32 = 2;

/// Relative distance from a tie, in ULPs, still counted as the tie
const TIE_TOLERANCE_ULPS: f64 = 32.0;

/// Identifies one of the three graded components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoreComponent {
    Assignment,
    Midterm,
    FinalExam,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    #[error("{component} score {value} is outside the range [0, 100]")]
    InvalidScore {
        component: ScoreComponent,
        value: f64,
    },
}

/// Letter grade derived from a rounded final score
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
}

impl LetterGrade {
    /// Inclusive lower bound of the band, `None` for the bottom band
    pub fn min_score(self) -> Option<f64> {
        match self {
            Self::A => Some(85.0),
            Self::B => Some(70.0),
            Self::C => Some(60.0),
            Self::D => Some(50.0),
            Self::E => None,
        }
    }

    /// Picks the highest band whose lower bound the score reaches
    pub fn from_score(score: f64) -> Self {
        Self::iter()
            .find(|letter| letter.min_score().is_some_and(|min| score >= min))
            .unwrap_or(Self::E)
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// All letters, best first
    pub fn all() -> Vec<LetterGrade> {
        Self::iter().collect()
    }
}

/// Weighted score and letter for one student in one course and term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinalGrade {
    pub final_score: f64,
    pub letter: LetterGrade,
}

/// Raw component scores as entered by a lecturer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreComponents {
    pub assignment: Option<f64>,
    pub midterm: Option<f64>,
    pub final_exam: Option<f64>,
}

impl ScoreComponents {
    /// Builds a validated set of component scores
    pub fn new(
        assignment: Option<f64>,
        midterm: Option<f64>,
        final_exam: Option<f64>,
    ) -> Result<Self, GradeError> {
        let scores = Self {
            assignment,
            midterm,
            final_exam,
        };
        scores.validate()?;
        Ok(scores)
    }

    /// Checks that every present score is a finite number in `[0, 100]`
    pub fn validate(&self) -> Result<(), GradeError> {
        for (component, value) in self.entries() {
            if let Some(value) = value
                && !(value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value))
            {
                return Err(GradeError::InvalidScore { component, value });
            }
        }

        Ok(())
    }

    pub fn final_grade(&self) -> FinalGrade {
        compute_grade(self.assignment, self.midterm, self.final_exam)
    }

    fn entries(&self) -> [(ScoreComponent, Option<f64>); 3] {
        [
            (ScoreComponent::Assignment, self.assignment),
            (ScoreComponent::Midterm, self.midterm),
            (ScoreComponent::FinalExam, self.final_exam),
        ]
    }
}

/// Computes the weighted final score and its letter grade.
///
/// Missing components count as zero. Inputs are expected to be validated
/// already (see [`ScoreComponents::validate`]).
pub fn compute_grade(
    assignment: Option<f64>,
    midterm: Option<f64>,
    final_exam: Option<f64>,
) -> FinalGrade {
    let weighted = assignment.unwrap_or(0.0) * ASSIGNMENT_WEIGHT
        + midterm.unwrap_or(0.0) * MIDTERM_WEIGHT
        + final_exam.unwrap_or(0.0) * FINAL_EXAM_WEIGHT;

    let final_score = round_half_up(weighted, SCORE_DECIMALS);

    FinalGrade {
        final_score,
        letter: LetterGrade::from_score(final_score),
    }
}

/// Rounds a non-negative value to `decimals` places, ties going up.
///
/// A scaled value within a few ULPs of `.5` is treated as the tie it
/// represents, so binary noise such as `6999.499999999999` still rounds up
/// while a genuine `6999.49999999` rounds down.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;

    let floor = scaled.floor();
    let tolerance = scaled.abs() * f64::EPSILON * TIE_TOLERANCE_ULPS;
    let rounded = if (scaled - floor - 0.5).abs() <= tolerance {
        floor + 1.0
    } else {
        scaled.round()
    };

    rounded / factor
}
