use crate::error::{ImportError, RowParseError};
use chrono::NaiveTime;
use csv::{ReaderBuilder, Trim, Writer};
use database::{
    entities::grade,
    services::{ImportSummary, RowError, grade::NewGrade, schedule::NewSchedule},
};
use models::{
    grade::{LetterGrade, ScoreComponents},
    schedule::DayOfWeek,
    term::{AcademicYear, Semester},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::io;
use uuid::Uuid;

/// Accepted time formats, most specific first
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// One line of a grade import file
#[derive(Debug, Deserialize)]
pub struct GradeRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub academic_year: String,
    pub semester: String,
    pub assignment: Option<f64>,
    pub midterm: Option<f64>,
    pub final_exam: Option<f64>,
}

impl GradeRow {
    /// Score ranges are checked later by the grade service
    pub fn into_new_grade(self) -> Result<NewGrade, RowParseError> {
        let academic_year = self
            .academic_year
            .parse::<AcademicYear>()
            .map_err(|_| RowParseError::AcademicYear(self.academic_year.clone()))?;
        let semester = self
            .semester
            .parse::<Semester>()
            .map_err(|_| RowParseError::Semester(self.semester.clone()))?;

        Ok(NewGrade {
            student_id: self.student_id,
            course_id: self.course_id,
            academic_year,
            semester,
            scores: ScoreComponents {
                assignment: self.assignment,
                midterm: self.midterm,
                final_exam: self.final_exam,
            },
        })
    }
}

/// One line of a schedule import file
#[derive(Debug, Deserialize)]
pub struct ScheduleRow {
    pub course_id: Uuid,
    pub lecturer_id: Uuid,
    pub class_name: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub room: String,
}

impl ScheduleRow {
    pub fn into_new_schedule(self) -> Result<NewSchedule, RowParseError> {
        Ok(NewSchedule {
            course_id: self.course_id,
            lecturer_id: self.lecturer_id,
            class_name: self.class_name,
            day: DayOfWeek::parse(&self.day)?,
            time_start: parse_time(&self.start)?,
            time_end: parse_time(&self.end)?,
            room: self.room,
        })
    }
}

/// Parses `HH:MM` or `HH:MM:SS`
pub fn parse_time(value: &str) -> Result<NaiveTime, RowParseError> {
    let value = value.trim();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or_else(|| RowParseError::Time(value.to_string()))
}

/// Rows that parsed, plus the file lines that did not
#[derive(Debug)]
pub struct ParsedBatch<T> {
    pub rows: Vec<T>,
    /// File line of each entry in `rows`
    lines: Vec<usize>,
    pub rejected: Vec<RowError>,
}

impl<T> Default for ParsedBatch<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            lines: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> ParsedBatch<T> {
    fn accept(&mut self, line: usize, row: T) {
        self.rows.push(row);
        self.lines.push(line);
    }

    fn reject(&mut self, line: usize, message: String) {
        self.rejected.push(RowError { row: line, message });
    }

    /// Maps batch positions in `summary` back to file lines and adds the
    /// rows that never reached the service
    pub fn reconcile(&self, mut summary: ImportSummary) -> ImportSummary {
        for skipped in &mut summary.skipped {
            if let Some(line) = skipped
                .row
                .checked_sub(1)
                .and_then(|idx| self.lines.get(idx))
            {
                skipped.row = *line;
            }
        }

        summary.skipped.extend(self.rejected.iter().cloned());
        summary.skipped.sort_by_key(|e| e.row);
        summary
    }
}

fn read_rows<R, Row, T, F>(input: R, convert: F) -> Result<ParsedBatch<T>, ImportError>
where
    R: io::Read,
    Row: DeserializeOwned,
    F: Fn(Row) -> Result<T, RowParseError>,
{
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();
    let mut batch = ParsedBatch::default();

    for (idx, record) in reader.records().enumerate() {
        // Line 1 is the header
        let line = idx + 2;

        let parsed = record
            .and_then(|record| record.deserialize::<Row>(Some(&headers)))
            .map_err(|e| e.to_string())
            .and_then(|row| convert(row).map_err(|e| e.to_string()));

        match parsed {
            Ok(row) => batch.accept(line, row),
            Err(message) => batch.reject(line, message),
        }
    }

    Ok(batch)
}

/// Reads a grade CSV with columns
/// `student_id,course_id,academic_year,semester,assignment,midterm,final_exam`
pub fn read_grades<R: io::Read>(input: R) -> Result<ParsedBatch<NewGrade>, ImportError> {
    read_rows(input, GradeRow::into_new_grade)
}

/// Reads a schedule CSV with columns
/// `course_id,lecturer_id,class_name,day,start,end,room`
pub fn read_schedules<R: io::Read>(input: R) -> Result<ParsedBatch<NewSchedule>, ImportError> {
    read_rows(input, ScheduleRow::into_new_schedule)
}

/// One line of a grade export; readable again by [`read_grades`]
#[derive(Debug, Serialize)]
pub struct GradeExportRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub academic_year: i16,
    pub semester: Semester,
    pub assignment: Option<f64>,
    pub midterm: Option<f64>,
    pub final_exam: Option<f64>,
    pub final_score: f64,
    pub letter_grade: LetterGrade,
}

impl From<&grade::Model> for GradeExportRow {
    fn from(model: &grade::Model) -> Self {
        Self {
            student_id: model.student_id,
            course_id: model.course_id,
            academic_year: model.academic_year,
            semester: model.semester,
            assignment: model.assignment_score,
            midterm: model.midterm_score,
            final_exam: model.final_exam_score,
            final_score: model.final_score,
            letter_grade: model.letter_grade,
        }
    }
}

pub fn write_grades<W: io::Write>(
    writer: &mut Writer<W>,
    grades: &[grade::Model],
) -> Result<(), ImportError> {
    for model in grades {
        writer.serialize(GradeExportRow::from(model))?;
    }

    writer.flush()?;
    Ok(())
}
