use database::services::dashboard::DashboardSummary;
use models::grade::LetterGrade;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct LetterCountResponse {
    pub letter: LetterGrade,
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub courses: u64,
    pub lecturers: u64,
    pub students: u64,
    pub schedules: u64,
    pub grades: u64,
    pub letter_distribution: Vec<LetterCountResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        DashboardResponse {
            courses: summary.courses,
            lecturers: summary.lecturers,
            students: summary.students,
            schedules: summary.schedules,
            grades: summary.grades,
            letter_distribution: summary
                .letter_distribution
                .into_iter()
                .map(|c| LetterCountResponse {
                    letter: c.letter,
                    count: c.count,
                })
                .collect(),
        }
    }
}
