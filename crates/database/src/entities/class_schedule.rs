use models::schedule::{DayOfWeek, ScheduleError, ScheduleSlot, TimeRange};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "class_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub lecturer_id: Uuid,
    pub class_name: String, // Section, e.g. "A"
    pub day_of_week: DayOfWeek,
    pub time_start: Time,
    pub time_end: Time,
    pub room: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// The stored meeting as seen by the conflict detector
    pub fn to_slot(&self) -> Result<ScheduleSlot, ScheduleError> {
        let time = TimeRange::new(self.time_start, self.time_end)?;
        ScheduleSlot::new(Some(self.id), self.day_of_week, &self.room, time)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::lecturer::Entity",
        from = "Column::LecturerId",
        to = "super::lecturer::Column::Id"
    )]
    Lecturer,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::lecturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
