use crate::{entities::class_schedule, error::ServiceError, services::ImportSummary};
use chrono::{NaiveDateTime, NaiveTime, Utc};
use log::{info, warn};
use models::schedule::{DayOfWeek, ScheduleError, ScheduleSlot, TimeRange, has_conflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, IsolationLevel, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashSet;
use uuid::Uuid;

/// A class meeting as submitted for creation or update
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub course_id: Uuid,
    pub lecturer_id: Uuid,
    pub class_name: String,
    pub day: DayOfWeek,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub room: String,
}

impl NewSchedule {
    pub fn to_slot(&self, id: Option<Uuid>) -> Result<ScheduleSlot, ScheduleError> {
        let time = TimeRange::new(self.time_start, self.time_end)?;
        ScheduleSlot::new(id, self.day, &self.room, time)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleFilter {
    pub day: Option<DayOfWeek>,
    pub room: Option<String>,
    pub course_id: Option<Uuid>,
    pub lecturer_id: Option<Uuid>,
}

pub struct ScheduleService;

impl ScheduleService {
    /// Books a room for a class meeting.
    ///
    /// The conflict check and the insert share a serializable transaction, so
    /// two overlapping bookings racing each other cannot both commit.
    pub async fn create_schedule(
        db: &DatabaseConnection,
        new_schedule: NewSchedule,
    ) -> Result<class_schedule::Model, ServiceError> {
        let id = Uuid::new_v4();
        let slot = new_schedule.to_slot(Some(id))?;

        let txn = Self::begin_serializable(db).await?;

        if Self::conflicts(&txn, &slot, None).await? {
            warn!("Rejected booking of {} on {} {}", slot.room, slot.day, slot.time);
            return Err(ServiceError::ScheduleConflict);
        }

        let now = Self::now();
        let model = Self::to_active_model(id, &new_schedule, &slot, now)
            .insert(&txn)
            .await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Moves or edits a class meeting; the meeting is not compared against itself
    pub async fn update_schedule(
        db: &DatabaseConnection,
        id: Uuid,
        new_schedule: NewSchedule,
    ) -> Result<class_schedule::Model, ServiceError> {
        let slot = new_schedule.to_slot(Some(id))?;

        let txn = Self::begin_serializable(db).await?;

        let existing = class_schedule::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("schedule"))?;

        if Self::conflicts(&txn, &slot, Some(id)).await? {
            warn!("Rejected move of {id} to {} on {} {}", slot.room, slot.day, slot.time);
            return Err(ServiceError::ScheduleConflict);
        }

        let mut active: class_schedule::ActiveModel = existing.into();
        active.course_id = Set(new_schedule.course_id);
        active.lecturer_id = Set(new_schedule.lecturer_id);
        active.class_name = Set(new_schedule.class_name);
        active.day_of_week = Set(slot.day);
        active.time_start = Set(slot.time.start());
        active.time_end = Set(slot.time.end());
        active.room = Set(slot.room);
        active.updated_at = Set(Self::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }

    /// Read-only conflict preview for a prospective booking
    pub async fn check_conflict(
        db: &DatabaseConnection,
        candidate: &ScheduleSlot,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, ServiceError> {
        Ok(Self::conflicts(db, candidate, exclude_id).await?)
    }

    pub async fn get_schedule(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<class_schedule::Model>, ServiceError> {
        Ok(class_schedule::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn delete_schedule(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let result = class_schedule::Entity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("schedule"));
        }

        Ok(())
    }

    /// Query schedules with pagination, ordered through the week
    pub async fn list_schedules(
        db: &DatabaseConnection,
        filter: ScheduleFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<class_schedule::Model>, u64), ServiceError> {
        let mut condition = Condition::all();

        if let Some(day) = filter.day {
            condition = condition.add(class_schedule::Column::DayOfWeek.eq(day));
        }

        if let Some(room) = filter.room
            && !room.trim().is_empty()
        {
            let pattern = format!("%{}%", room.trim());
            condition = condition.add(class_schedule::Column::Room.like(pattern));
        }

        if let Some(course_id) = filter.course_id {
            condition = condition.add(class_schedule::Column::CourseId.eq(course_id));
        }

        if let Some(lecturer_id) = filter.lecturer_id {
            condition = condition.add(class_schedule::Column::LecturerId.eq(lecturer_id));
        }

        let query = class_schedule::Entity::find()
            .filter(condition)
            .order_by_asc(class_schedule::Column::DayOfWeek)
            .order_by_asc(class_schedule::Column::TimeStart)
            .order_by_asc(class_schedule::Column::Room);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let schedules = paginator.fetch_page(page.saturating_sub(1)).await?; // SeaORM uses 0-based pages

        Ok((schedules, total_items))
    }

    /// Books a batch of class meetings in one serializable transaction.
    ///
    /// Each row is checked against stored meetings and against rows accepted
    /// earlier in the batch. Invalid or conflicting rows are skipped and reported.
    pub async fn import_schedules(
        db: &DatabaseConnection,
        rows: Vec<NewSchedule>,
    ) -> Result<ImportSummary, ServiceError> {
        let txn = Self::begin_serializable(db).await?;
        let mut summary = ImportSummary::default();
        let now = Self::now();

        let days: HashSet<DayOfWeek> = rows.iter().map(|row| row.day).collect();
        let in_days = Condition::all().add(class_schedule::Column::DayOfWeek.is_in(days));
        let mut booked = Self::load_slots(&txn, in_days).await?;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;
            let id = Uuid::new_v4();

            let slot = match row.to_slot(Some(id)) {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Skipping schedule row {row_number}: {e}");
                    summary.skip(row_number, e.to_string());
                    continue;
                }
            };

            if has_conflict(&slot, &booked, None) {
                warn!(
                    "Skipping schedule row {row_number}: {} is booked on {} {}",
                    slot.room, slot.day, slot.time
                );
                summary.skip(row_number, ServiceError::ScheduleConflict.to_string());
                continue;
            }

            Self::to_active_model(id, &row, &slot, now)
                .insert(&txn)
                .await?;

            booked.push(slot);
            summary.inserted += 1;
        }

        txn.commit().await?;

        info!(
            "Imported schedules: {} inserted, {} skipped",
            summary.inserted,
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn begin_serializable(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
        db.begin_with_config(Some(IsolationLevel::Serializable), None)
            .await
    }

    /// Loads the candidate's weekday and runs the conflict rule over it
    async fn conflicts<C: ConnectionTrait>(
        db: &C,
        candidate: &ScheduleSlot,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let same_day = Self::load_slots(
            db,
            Condition::all().add(class_schedule::Column::DayOfWeek.eq(candidate.day)),
        )
        .await?;

        Ok(has_conflict(candidate, &same_day, exclude_id))
    }

    async fn load_slots<C: ConnectionTrait>(
        db: &C,
        condition: Condition,
    ) -> Result<Vec<ScheduleSlot>, DbErr> {
        let models = class_schedule::Entity::find()
            .filter(condition)
            .all(db)
            .await?;

        let slots = models
            .iter()
            .filter_map(|model| match model.to_slot() {
                Ok(slot) => Some(slot),
                Err(e) => {
                    warn!("Ignoring malformed schedule {}: {e}", model.id);
                    None
                }
            })
            .collect();

        Ok(slots)
    }

    fn to_active_model(
        id: Uuid,
        new_schedule: &NewSchedule,
        slot: &ScheduleSlot,
        now: NaiveDateTime,
    ) -> class_schedule::ActiveModel {
        class_schedule::ActiveModel {
            id: Set(id),
            course_id: Set(new_schedule.course_id),
            lecturer_id: Set(new_schedule.lecturer_id),
            class_name: Set(new_schedule.class_name.trim().to_string()),
            day_of_week: Set(slot.day),
            time_start: Set(slot.time.start()),
            time_end: Set(slot.time.end()),
            room: Set(slot.room.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn new_schedule(day: DayOfWeek, room: &str, start: u32, end: u32) -> NewSchedule {
        NewSchedule {
            course_id: Uuid::new_v4(),
            lecturer_id: Uuid::new_v4(),
            class_name: "A".to_string(),
            day,
            time_start: time(start, 0),
            time_end: time(end, 0),
            room: room.to_string(),
        }
    }

    fn stored(id: Uuid, new_schedule: &NewSchedule) -> class_schedule::Model {
        let now = ScheduleService::now();

        class_schedule::Model {
            id,
            course_id: new_schedule.course_id,
            lecturer_id: new_schedule.lecturer_id,
            class_name: new_schedule.class_name.clone(),
            day_of_week: new_schedule.day,
            time_start: new_schedule.time_start,
            time_end: new_schedule.time_end,
            room: new_schedule.room.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_interval() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let input = new_schedule(DayOfWeek::Monday, "R101", 10, 8);

        let err = ScheduleService::create_schedule(&db, input)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Schedule(ScheduleError::InvalidInterval { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let booked = new_schedule(DayOfWeek::Monday, "R101", 8, 10);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(Uuid::new_v4(), &booked)]])
            .into_connection();

        let mut input = new_schedule(DayOfWeek::Monday, "r101", 8, 10);
        input.time_start = time(8, 30);
        input.time_end = time(9, 30);

        let err = ScheduleService::create_schedule(&db, input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ScheduleConflict));
    }

    #[tokio::test]
    async fn test_create_accepts_adjacent_slot() {
        let booked = new_schedule(DayOfWeek::Monday, "R101", 8, 10);
        let input = new_schedule(DayOfWeek::Monday, "R101", 10, 12);
        let inserted = stored(Uuid::new_v4(), &input);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(Uuid::new_v4(), &booked)]])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let model = ScheduleService::create_schedule(&db, input).await.unwrap();
        assert_eq!(model, inserted);
    }

    #[tokio::test]
    async fn test_update_does_not_conflict_with_itself() {
        let id = Uuid::new_v4();
        let input = new_schedule(DayOfWeek::Wednesday, "R201", 13, 15);
        let current = stored(id, &input);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current.clone()]])
            .append_query_results([vec![current.clone()]])
            .append_query_results([vec![current.clone()]])
            .into_connection();

        let model = ScheduleService::update_schedule(&db, id, input)
            .await
            .unwrap();
        assert_eq!(model.id, id);
    }

    #[tokio::test]
    async fn test_update_missing_schedule() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<class_schedule::Model>::new()])
            .into_connection();

        let input = new_schedule(DayOfWeek::Friday, "R201", 8, 9);
        let err = ScheduleService::update_schedule(&db, Uuid::new_v4(), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("schedule")));
    }

    #[tokio::test]
    async fn test_import_rejects_overlap_within_batch() {
        let first = new_schedule(DayOfWeek::Tuesday, "Lab 1", 8, 10);
        let overlapping = new_schedule(DayOfWeek::Tuesday, "Lab 1", 9, 11);
        let elsewhere = new_schedule(DayOfWeek::Tuesday, "Lab 2", 9, 11);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<class_schedule::Model>::new()])
            .append_query_results([vec![stored(Uuid::new_v4(), &first)]])
            .append_query_results([vec![stored(Uuid::new_v4(), &elsewhere)]])
            .into_connection();

        let summary = ScheduleService::import_schedules(&db, vec![first, overlapping, elsewhere])
            .await
            .unwrap();

        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].row, 2);
        assert!(summary.skipped[0].message.contains("schedule conflict"));
    }
}
