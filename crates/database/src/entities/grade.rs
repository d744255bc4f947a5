use models::{
    grade::{FinalGrade, LetterGrade, ScoreComponents},
    term::{AcademicYear, Semester},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Component scores and the final grade derived from them. The final score
/// and letter are only ever written together with the components.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub academic_year: i16,
    pub semester: Semester,
    pub assignment_score: Option<f64>,
    pub midterm_score: Option<f64>,
    pub final_exam_score: Option<f64>,
    pub final_score: f64,
    pub letter_grade: LetterGrade,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn scores(&self) -> ScoreComponents {
        ScoreComponents {
            assignment: self.assignment_score,
            midterm: self.midterm_score,
            final_exam: self.final_exam_score,
        }
    }

    pub fn final_grade(&self) -> FinalGrade {
        FinalGrade {
            final_score: self.final_score,
            letter: self.letter_grade,
        }
    }

    pub fn academic_year(&self) -> AcademicYear {
        AcademicYear(self.academic_year)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
