use crate::{entities::grade, error::ServiceError, services::ImportSummary};
use chrono::{NaiveDateTime, Utc};
use log::{info, warn};
use models::{
    grade::ScoreComponents,
    term::{AcademicYear, Semester},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

/// Scores for one student in one course and term
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub academic_year: AcademicYear,
    pub semester: Semester,
    pub scores: ScoreComponents,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeFilter {
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub academic_year: Option<AcademicYear>,
    pub semester: Option<Semester>,
}

pub struct GradeService;

impl GradeService {
    /// Records a new grade, rejecting a second grade for the same student, course and term
    pub async fn create_grade(
        db: &DatabaseConnection,
        new_grade: NewGrade,
    ) -> Result<grade::Model, ServiceError> {
        Self::validate(&new_grade)?;

        if Self::find_by_term(db, &new_grade).await?.is_some() {
            return Err(ServiceError::DuplicateGrade);
        }

        let model = Self::to_active_model(&new_grade, Self::now())
            .insert(db)
            .await
            .map_err(Self::insert_error)?;

        info!(
            "Recorded grade {} ({}) for student {}",
            model.final_score, model.letter_grade, model.student_id
        );
        Ok(model)
    }

    /// Replaces the component scores of a grade and recomputes its final grade
    pub async fn update_grade(
        db: &DatabaseConnection,
        id: Uuid,
        scores: ScoreComponents,
    ) -> Result<grade::Model, ServiceError> {
        scores.validate()?;

        let existing = grade::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("grade"))?;

        Self::apply_scores(db, existing, scores).await
    }

    pub async fn get_grade(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<grade::Model>, ServiceError> {
        Ok(grade::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn delete_grade(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let result = grade::Entity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("grade"));
        }

        Ok(())
    }

    /// Query grades with pagination and filtering
    pub async fn list_grades(
        db: &DatabaseConnection,
        filter: GradeFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<grade::Model>, u64), ServiceError> {
        let mut condition = Condition::all();

        if let Some(student_id) = filter.student_id {
            condition = condition.add(grade::Column::StudentId.eq(student_id));
        }

        if let Some(course_id) = filter.course_id {
            condition = condition.add(grade::Column::CourseId.eq(course_id));
        }

        if let Some(year) = filter.academic_year {
            condition = condition.add(grade::Column::AcademicYear.eq(*year));
        }

        if let Some(semester) = filter.semester {
            condition = condition.add(grade::Column::Semester.eq(semester));
        }

        let query = grade::Entity::find()
            .filter(condition)
            .order_by_desc(grade::Column::AcademicYear)
            .order_by_asc(grade::Column::Semester)
            .order_by_asc(grade::Column::CreatedAt)
            .order_by_asc(grade::Column::Id);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let grades = paginator.fetch_page(page.saturating_sub(1)).await?; // SeaORM uses 0-based pages

        Ok((grades, total_items))
    }

    /// Inserts or updates a batch of grades in one transaction.
    ///
    /// Rows with invalid scores are skipped and reported; a row whose term key
    /// already exists overwrites that grade.
    pub async fn import_grades(
        db: &DatabaseConnection,
        rows: Vec<NewGrade>,
    ) -> Result<ImportSummary, ServiceError> {
        let txn = db.begin().await?;
        let mut summary = ImportSummary::default();
        let now = Self::now();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;

            if let Err(e) = Self::validate(&row) {
                warn!("Skipping grade row {row_number}: {e}");
                summary.skip(row_number, e.to_string());
                continue;
            }

            match Self::find_by_term(&txn, &row).await? {
                Some(existing) => {
                    Self::apply_scores(&txn, existing, row.scores).await?;
                    summary.updated += 1;
                }
                None => {
                    Self::to_active_model(&row, now).insert(&txn).await?;
                    summary.inserted += 1;
                }
            }
        }

        txn.commit().await?;

        info!(
            "Imported grades: {} inserted, {} updated, {} skipped",
            summary.inserted,
            summary.updated,
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn validate(new_grade: &NewGrade) -> Result<(), ServiceError> {
        new_grade.scores.validate()?;
        new_grade.academic_year.validate()?;
        Ok(())
    }

    /// A concurrent insert of the same term key loses on the unique index
    fn insert_error(err: DbErr) -> ServiceError {
        Self::classify_insert_error(err.sql_err(), err)
    }

    fn classify_insert_error(sql_err: Option<SqlErr>, err: DbErr) -> ServiceError {
        match sql_err {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateGrade,
            _ => ServiceError::Database(err),
        }
    }

    async fn find_by_term<C: ConnectionTrait>(
        db: &C,
        key: &NewGrade,
    ) -> Result<Option<grade::Model>, ServiceError> {
        let existing = grade::Entity::find()
            .filter(grade::Column::StudentId.eq(key.student_id))
            .filter(grade::Column::CourseId.eq(key.course_id))
            .filter(grade::Column::AcademicYear.eq(*key.academic_year))
            .filter(grade::Column::Semester.eq(key.semester))
            .one(db)
            .await?;

        Ok(existing)
    }

    async fn apply_scores<C: ConnectionTrait>(
        db: &C,
        existing: grade::Model,
        scores: ScoreComponents,
    ) -> Result<grade::Model, ServiceError> {
        Ok(Self::rescored(existing, scores, Self::now())
            .update(db)
            .await?)
    }

    /// Components and the final grade derived from them change together
    fn rescored(
        existing: grade::Model,
        scores: ScoreComponents,
        now: NaiveDateTime,
    ) -> grade::ActiveModel {
        let final_grade = scores.final_grade();

        let mut active: grade::ActiveModel = existing.into();
        active.assignment_score = Set(scores.assignment);
        active.midterm_score = Set(scores.midterm);
        active.final_exam_score = Set(scores.final_exam);
        active.final_score = Set(final_grade.final_score);
        active.letter_grade = Set(final_grade.letter);
        active.updated_at = Set(now);
        active
    }

    fn to_active_model(new_grade: &NewGrade, now: NaiveDateTime) -> grade::ActiveModel {
        let final_grade = new_grade.scores.final_grade();

        grade::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(new_grade.student_id),
            course_id: Set(new_grade.course_id),
            academic_year: Set(*new_grade.academic_year),
            semester: Set(new_grade.semester),
            assignment_score: Set(new_grade.scores.assignment),
            midterm_score: Set(new_grade.scores.midterm),
            final_exam_score: Set(new_grade.scores.final_exam),
            final_score: Set(final_grade.final_score),
            letter_grade: Set(final_grade.letter),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}
