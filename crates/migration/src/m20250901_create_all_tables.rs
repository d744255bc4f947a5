use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Credits).small_integer().not_null())
                    .col(timestamp_col(Courses::CreatedAt))
                    .col(timestamp_col(Courses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create lecturers table
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecturers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lecturers::EmployeeNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lecturers::Name).string().not_null())
                    .col(timestamp_col(Lecturers::CreatedAt))
                    .col(timestamp_col(Lecturers::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(timestamp_col(Students::CreatedAt))
                    .col(timestamp_col(Students::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create class_schedules table
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSchedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSchedules::CourseId).uuid().not_null())
                    .col(ColumnDef::new(ClassSchedules::LecturerId).uuid().not_null())
                    .col(ColumnDef::new(ClassSchedules::ClassName).string().not_null())
                    .col(
                        ColumnDef::new(ClassSchedules::DayOfWeek)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(ClassSchedules::DayOfWeek)
                                    .between(1, 6),
                            ),
                    )
                    .col(ColumnDef::new(ClassSchedules::TimeStart).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::TimeEnd).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::Room).string().not_null())
                    .col(timestamp_col(ClassSchedules::CreatedAt))
                    .col(timestamp_col(ClassSchedules::UpdatedAt))
                    .check(
                        Expr::col(ClassSchedules::TimeStart)
                            .lt(Expr::col(ClassSchedules::TimeEnd)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-course_id")
                            .from(ClassSchedules::Table, ClassSchedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-lecturer_id")
                            .from(ClassSchedules::Table, ClassSchedules::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create grades table
        manager.create_table(grades_table()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order (respecting foreign key constraints)
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClassSchedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn grades_table() -> TableCreateStatement {
    Table::create()
        .table(Grades::Table)
        .if_not_exists()
        .col(ColumnDef::new(Grades::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Grades::StudentId).uuid().not_null())
        .col(ColumnDef::new(Grades::CourseId).uuid().not_null())
        .col(
            ColumnDef::new(Grades::AcademicYear)
                .small_integer()
                .not_null()
                .check(Expr::col(Grades::AcademicYear).between(1900, 2999)),
        )
        // Ordinal, 1 = odd through 3 = short
        .col(
            ColumnDef::new(Grades::Semester)
                .small_integer()
                .not_null()
                .check(Expr::col(Grades::Semester).between(1, 3)),
        )
        .col(score_col(Grades::AssignmentScore))
        .col(score_col(Grades::MidtermScore))
        .col(score_col(Grades::FinalExamScore))
        .col(score_col(Grades::FinalScore).not_null())
        .col(ColumnDef::new(Grades::LetterGrade).text().not_null())
        .col(timestamp_col(Grades::CreatedAt))
        .col(timestamp_col(Grades::UpdatedAt))
        .foreign_key(
            ForeignKey::create()
                .name("fk-grades-student_id")
                .from(Grades::Table, Grades::StudentId)
                .to(Students::Table, Students::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-grades-course_id")
                .from(Grades::Table, Grades::CourseId)
                .to(Courses::Table, Courses::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

/// Score on the 0-100 scale; NULL passes the check
fn score_col(column: Grades) -> ColumnDef {
    ColumnDef::new(column)
        .double()
        .check(Expr::col(column).between(0, 100))
        .to_owned()
}

/// Non-null timestamp defaulting to the insert time
fn timestamp_col<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
    Credits,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Lecturers {
    Table,
    Id,
    EmployeeNumber,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    StudentNumber,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ClassSchedules {
    Table,
    Id,
    CourseId,
    LecturerId,
    ClassName,
    DayOfWeek,
    TimeStart,
    TimeEnd,
    Room,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Grades {
    Table,
    Id,
    StudentId,
    CourseId,
    AcademicYear,
    Semester,
    AssignmentScore,
    MidtermScore,
    FinalExamScore,
    FinalScore,
    LetterGrade,
    CreatedAt,
    UpdatedAt,
}
