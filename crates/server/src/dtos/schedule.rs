use crate::dtos::pagination::{PaginationMeta, default_page, default_per_page};
use chrono::NaiveTime;
use database::{
    entities::class_schedule,
    services::schedule::{NewSchedule, ScheduleFilter},
};
use models::schedule::{DayOfWeek, ScheduleError, ScheduleSlot, TimeRange};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScheduleRequest {
    pub course_id: Uuid,
    pub lecturer_id: Uuid,
    /// Section name, e.g. "A"
    pub class_name: String,
    pub day: DayOfWeek,
    #[schema(value_type = String, example = "08:00:00")]
    pub time_start: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub time_end: NaiveTime,
    pub room: String,
}

impl From<ScheduleRequest> for NewSchedule {
    fn from(request: ScheduleRequest) -> Self {
        NewSchedule {
            course_id: request.course_id,
            lecturer_id: request.lecturer_id,
            class_name: request.class_name,
            day: request.day,
            time_start: request.time_start,
            time_end: request.time_end,
            room: request.room,
        }
    }
}

/// A prospective booking to test against the stored schedule
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConflictCheckRequest {
    pub day: DayOfWeek,
    #[schema(value_type = String, example = "08:00:00")]
    pub time_start: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub time_end: NaiveTime,
    pub room: String,
    /// The schedule being edited, left out of the comparison
    pub exclude_id: Option<Uuid>,
}

impl ConflictCheckRequest {
    pub fn to_slot(&self) -> Result<ScheduleSlot, ScheduleError> {
        let time = TimeRange::new(self.time_start, self.time_end)?;
        ScheduleSlot::new(self.exclude_id, self.day, &self.room, time)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictCheckResponse {
    pub conflict: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: String,
    pub course_id: String,
    pub lecturer_id: String,
    pub class_name: String,
    pub day: DayOfWeek,
    /// 1 for Monday through 6 for Saturday
    pub day_ordinal: u8,
    #[schema(value_type = String, example = "08:00:00")]
    pub time_start: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub time_end: NaiveTime,
    pub room: String,
}

impl From<class_schedule::Model> for ScheduleResponse {
    fn from(model: class_schedule::Model) -> Self {
        ScheduleResponse {
            id: model.id.to_string(),
            course_id: model.course_id.to_string(),
            lecturer_id: model.lecturer_id.to_string(),
            class_name: model.class_name,
            day: model.day_of_week,
            day_ordinal: model.day_of_week.ordinal(),
            time_start: model.time_start,
            time_end: model.time_end,
            room: model.room,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedSchedulesResponse {
    pub schedules: Vec<ScheduleResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ScheduleQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub day: Option<DayOfWeek>,
    pub room: Option<String>,
    pub course_id: Option<Uuid>,
    pub lecturer_id: Option<Uuid>,
}

impl ScheduleQueryParams {
    pub fn filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            day: self.day,
            room: self.room.clone(),
            course_id: self.course_id,
            lecturer_id: self.lecturer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_check_request_validates_interval() {
        let request: ConflictCheckRequest = serde_json::from_str(
            r#"{"day":"Monday","time_start":"10:00:00","time_end":"08:00:00","room":"R101"}"#,
        )
        .unwrap();

        assert!(matches!(
            request.to_slot(),
            Err(ScheduleError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_conflict_check_day_ignores_case() {
        let request: ConflictCheckRequest = serde_json::from_str(
            r#"{"day":"WEDNESDAY","time_start":"08:00:00","time_end":"09:00:00","room":"R101"}"#,
        )
        .unwrap();
        assert_eq!(request.day, DayOfWeek::Wednesday);
    }

    #[test]
    fn test_schedule_request_into_new_schedule() {
        let request: ScheduleRequest = serde_json::from_str(
            r#"{
                "course_id": "5f0c6a4e-3a5b-4c1e-9f57-2f1d4b6f8a10",
                "lecturer_id": "8b3c2f6e-1d4a-4e2b-8a77-0c9e5d3b2a11",
                "class_name": "B",
                "day": "saturday",
                "time_start": "13:00:00",
                "time_end": "14:40:00",
                "room": "GK 2.03"
            }"#,
        )
        .unwrap();

        let new_schedule = NewSchedule::from(request);
        let slot = new_schedule.to_slot(None).unwrap();

        assert_eq!(slot.day, DayOfWeek::Saturday);
        assert_eq!(slot.time.to_string(), "13:00-14:40");
        assert_eq!(slot.room, "GK 2.03");
    }
}
