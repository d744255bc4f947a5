use crate::{
    entities::{class_schedule, course, grade, lecturer, student},
    error::ServiceError,
};
use models::grade::LetterGrade;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, sea_query::Expr};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterCount {
    pub letter: LetterGrade,
    pub count: u64,
}

/// Headline numbers for the administration dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub courses: u64,
    pub lecturers: u64,
    pub students: u64,
    pub schedules: u64,
    pub grades: u64,
    pub letter_distribution: Vec<LetterCount>,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn summary(db: &DatabaseConnection) -> Result<DashboardSummary, ServiceError> {
        let courses = course::Entity::find().count(db).await?;
        let lecturers = lecturer::Entity::find().count(db).await?;
        let students = student::Entity::find().count(db).await?;
        let schedules = class_schedule::Entity::find().count(db).await?;
        let grades = grade::Entity::find().count(db).await?;

        let letter_rows = grade::Entity::find()
            .select_only()
            .column(grade::Column::LetterGrade)
            .column_as(Expr::col(grade::Column::Id).count(), "count")
            .group_by(grade::Column::LetterGrade)
            .into_tuple::<(LetterGrade, i64)>()
            .all(db)
            .await?;

        Ok(DashboardSummary {
            courses,
            lecturers,
            students,
            schedules,
            grades,
            letter_distribution: Self::distribution(letter_rows),
        })
    }

    /// One entry per letter, best first, including letters nobody received
    fn distribution(rows: Vec<(LetterGrade, i64)>) -> Vec<LetterCount> {
        LetterGrade::all()
            .into_iter()
            .map(|letter| LetterCount {
                letter,
                count: rows
                    .iter()
                    .filter(|(l, _)| *l == letter)
                    .map(|(_, n)| (*n).max(0) as u64)
                    .sum(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_fills_missing_letters() {
        let counts =
            DashboardService::distribution(vec![(LetterGrade::C, 4), (LetterGrade::A, 2)]);

        let as_pairs: Vec<(LetterGrade, u64)> =
            counts.iter().map(|c| (c.letter, c.count)).collect();
        assert_eq!(
            as_pairs,
            vec![
                (LetterGrade::A, 2),
                (LetterGrade::B, 0),
                (LetterGrade::C, 4),
                (LetterGrade::D, 0),
                (LetterGrade::E, 0),
            ]
        );
    }

    #[test]
    fn test_distribution_empty() {
        let counts = DashboardService::distribution(vec![]);
        assert_eq!(counts.len(), 5);
        assert!(counts.iter().all(|c| c.count == 0));
    }
}
