use crate::dtos::pagination::{PaginationMeta, default_page, default_per_page};
use chrono::NaiveDateTime;
use database::{
    entities::grade,
    services::grade::{GradeFilter, NewGrade},
};
use models::{
    grade::{LetterGrade, ScoreComponents},
    term::{AcademicYear, Semester},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGradeRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    /// Calendar year the academic year starts in, e.g. 2024 for 2024/2025
    pub academic_year: i16,
    pub semester: Semester,
    #[serde(flatten)]
    pub scores: ScoreComponents,
}

impl From<CreateGradeRequest> for NewGrade {
    fn from(request: CreateGradeRequest) -> Self {
        NewGrade {
            student_id: request.student_id,
            course_id: request.course_id,
            academic_year: AcademicYear(request.academic_year),
            semester: request.semester,
            scores: request.scores,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub academic_year: i16,
    /// Display form of the academic year, e.g. "2024/2025"
    pub academic_year_label: String,
    pub semester: Semester,
    pub assignment_score: Option<f64>,
    pub midterm_score: Option<f64>,
    pub final_exam_score: Option<f64>,
    pub final_score: f64,
    pub letter_grade: LetterGrade,
    pub updated_at: NaiveDateTime,
}

impl From<grade::Model> for GradeResponse {
    fn from(model: grade::Model) -> Self {
        GradeResponse {
            id: model.id.to_string(),
            student_id: model.student_id.to_string(),
            course_id: model.course_id.to_string(),
            academic_year: model.academic_year,
            academic_year_label: model.academic_year().to_string(),
            semester: model.semester,
            assignment_score: model.assignment_score,
            midterm_score: model.midterm_score,
            final_exam_score: model.final_exam_score,
            final_score: model.final_score,
            letter_grade: model.letter_grade,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedGradesResponse {
    pub grades: Vec<GradeResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct GradeQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub academic_year: Option<i16>,
    pub semester: Option<Semester>,
}

impl GradeQueryParams {
    pub fn filter(&self) -> GradeFilter {
        GradeFilter {
            student_id: self.student_id,
            course_id: self.course_id,
            academic_year: self.academic_year.map(AcademicYear),
            semester: self.semester,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::grade::compute_grade;

    #[test]
    fn test_create_request_flattens_scores() {
        let body = r#"{
            "student_id": "5f0c6a4e-3a5b-4c1e-9f57-2f1d4b6f8a10",
            "course_id": "8b3c2f6e-1d4a-4e2b-8a77-0c9e5d3b2a11",
            "academic_year": 2024,
            "semester": "even",
            "assignment": 80,
            "final_exam": 60
        }"#;

        let request: CreateGradeRequest = serde_json::from_str(body).unwrap();
        let new_grade = NewGrade::from(request);

        assert_eq!(new_grade.academic_year, AcademicYear(2024));
        assert_eq!(new_grade.semester, Semester::Even);
        assert_eq!(new_grade.scores.assignment, Some(80.0));
        assert_eq!(new_grade.scores.midterm, None);
        assert_eq!(new_grade.scores.final_exam, Some(60.0));
    }

    #[test]
    fn test_response_from_model() {
        let final_grade = compute_grade(Some(80.0), Some(70.0), Some(60.0));
        let now = chrono::Utc::now().naive_utc();
        let model = grade::Model {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            academic_year: 2023,
            semester: Semester::Odd,
            assignment_score: Some(80.0),
            midterm_score: Some(70.0),
            final_exam_score: Some(60.0),
            final_score: final_grade.final_score,
            letter_grade: final_grade.letter,
            created_at: now,
            updated_at: now,
        };

        let response = GradeResponse::from(model);
        assert_eq!(response.academic_year_label, "2023/2024");
        assert_eq!(response.final_score, 69.0);
        assert_eq!(response.letter_grade, LetterGrade::C);
    }

    #[test]
    fn test_response_label_for_unvalidated_year() {
        let now = chrono::Utc::now().naive_utc();
        let model = grade::Model {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            academic_year: i16::MAX,
            semester: Semester::Short,
            assignment_score: None,
            midterm_score: None,
            final_exam_score: None,
            final_score: 0.0,
            letter_grade: LetterGrade::E,
            created_at: now,
            updated_at: now,
        };

        let response = GradeResponse::from(model);
        assert_eq!(response.academic_year_label, "32767/32767");
    }
}
