use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Conflict checks load every meeting on a weekday, usually narrowed by room
        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_day_room")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::DayOfWeek)
                    .col(ClassSchedules::Room)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_course_id")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_lecturer_id")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::LecturerId)
                    .to_owned(),
            )
            .await?;

        // One grade per student, course and term
        manager
            .create_index(
                Index::create()
                    .name("idx_grades_term_unique")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::CourseId)
                    .col(Grades::AcademicYear)
                    .col(Grades::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grades_course_id")
                    .table(Grades::Table)
                    .col(Grades::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_grades_course_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_grades_term_unique").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_lecturer_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_course_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_class_schedules_day_room").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum ClassSchedules {
    Table,
    DayOfWeek,
    Room,
    CourseId,
    LecturerId,
}

#[derive(Iden)]
enum Grades {
    Table,
    StudentId,
    CourseId,
    AcademicYear,
    Semester,
}
