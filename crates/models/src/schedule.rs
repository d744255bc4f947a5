use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("start time {start} must be before end time {end}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },
    #[error("room must not be empty")]
    EmptyRoom,
    #[error("unknown day of week: {0}")]
    UnknownDay(String),
}

/// Teaching days, Monday through Saturday
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    /// Position in the teaching week, `1..=6`
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::iter().find(|day| day.ordinal() == ordinal)
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<DayOfWeek> {
        Self::iter().collect()
    }

    /// Parses a day name, reporting unknown names as [`ScheduleError::UnknownDay`]
    pub fn parse(day: &str) -> Result<Self, ScheduleError> {
        Self::from_str(day.trim()).map_err(|_| ScheduleError::UnknownDay(day.to_string()))
    }
}

// Accepts the same spellings as `parse`, e.g. "monday" or " MONDAY "
impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(de::Error::custom)
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open time-of-day interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = ScheduleError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Touching intervals (one ends exactly when the other starts) do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A weekly class meeting in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleSlot {
    /// Set for slots that are already stored
    pub id: Option<Uuid>,
    pub day: DayOfWeek,
    pub room: String,
    pub time: TimeRange,
}

impl ScheduleSlot {
    pub fn new(
        id: Option<Uuid>,
        day: DayOfWeek,
        room: &str,
        time: TimeRange,
    ) -> Result<Self, ScheduleError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(ScheduleError::EmptyRoom);
        }

        Ok(Self {
            id,
            day,
            room: room.to_string(),
            time,
        })
    }

    /// Room names are free text; surrounding whitespace and ASCII case are ignored
    pub fn same_room(&self, other: &Self) -> bool {
        self.room.trim().eq_ignore_ascii_case(other.room.trim())
    }

    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.day == other.day && self.same_room(other) && self.time.overlaps(&other.time)
    }
}

/// Whether `candidate` double-books a room against any slot in `existing`.
///
/// The slot whose id equals `exclude_id` is skipped so an edited slot is not
/// compared against its stored self.
pub fn has_conflict(
    candidate: &ScheduleSlot,
    existing: &[ScheduleSlot],
    exclude_id: Option<Uuid>,
) -> bool {
    existing
        .iter()
        .filter(|slot| exclude_id.is_none() || slot.id != exclude_id)
        .any(|slot| candidate.conflicts_with(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn slot(
        id: Option<Uuid>,
        day: DayOfWeek,
        room: &str,
        start: (u32, u32),
        end: (u32, u32),
    ) -> ScheduleSlot {
        let range = TimeRange::new(time(start.0, start.1), time(end.0, end.1)).unwrap();
        ScheduleSlot::new(id, day, room, range).unwrap()
    }

    #[test]
    fn test_contained_interval_conflicts() {
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Monday, "R101", (8, 0), (10, 0))];
        let candidate = slot(None, DayOfWeek::Monday, "R101", (8, 30), (9, 30));
        assert!(has_conflict(&candidate, &existing, None));

        // And the other way round
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Monday, "R101", (8, 30), (9, 30))];
        let candidate = slot(None, DayOfWeek::Monday, "R101", (8, 0), (10, 0));
        assert!(has_conflict(&candidate, &existing, None));
    }

    #[test]
    fn test_partial_overlaps_conflict() {
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Tuesday, "R101", (8, 0), (10, 0))];

        let starts_inside = slot(None, DayOfWeek::Tuesday, "R101", (9, 0), (11, 0));
        let ends_inside = slot(None, DayOfWeek::Tuesday, "R101", (7, 0), (9, 0));
        let identical = slot(None, DayOfWeek::Tuesday, "R101", (8, 0), (10, 0));

        assert!(has_conflict(&starts_inside, &existing, None));
        assert!(has_conflict(&ends_inside, &existing, None));
        assert!(has_conflict(&identical, &existing, None));
    }

    #[test]
    fn test_adjacent_slots_do_not_conflict() {
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Monday, "R101", (8, 0), (10, 0))];

        let after = slot(None, DayOfWeek::Monday, "R101", (10, 0), (12, 0));
        let before = slot(None, DayOfWeek::Monday, "R101", (6, 0), (8, 0));

        assert!(!has_conflict(&after, &existing, None));
        assert!(!has_conflict(&before, &existing, None));
    }

    #[test]
    fn test_different_room_or_day_does_not_conflict() {
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Monday, "R101", (8, 0), (10, 0))];

        let other_room = slot(None, DayOfWeek::Monday, "R102", (8, 0), (10, 0));
        let other_day = slot(None, DayOfWeek::Wednesday, "R101", (8, 0), (10, 0));

        assert!(!has_conflict(&other_room, &existing, None));
        assert!(!has_conflict(&other_day, &existing, None));
    }

    #[test]
    fn test_room_comparison_ignores_case_and_padding() {
        let existing = [slot(Some(Uuid::new_v4()), DayOfWeek::Friday, "Lab A", (13, 0), (15, 0))];
        let candidate = slot(None, DayOfWeek::Friday, "  lab a ", (14, 0), (16, 0));

        assert!(has_conflict(&candidate, &existing, None));
    }

    #[test]
    fn test_excluded_slot_is_ignored() {
        let id = Uuid::new_v4();
        let stored = slot(Some(id), DayOfWeek::Thursday, "R201", (8, 0), (10, 0));
        let existing = [stored.clone()];

        assert!(!has_conflict(&stored, &existing, Some(id)));
        assert!(has_conflict(&stored, &existing, None));

        // Excluding one slot still compares against the rest
        let other = slot(Some(Uuid::new_v4()), DayOfWeek::Thursday, "R201", (9, 0), (11, 0));
        let existing = [stored.clone(), other];
        assert!(has_conflict(&stored, &existing, Some(id)));
    }

    #[test]
    fn test_empty_existing_set() {
        let candidate = slot(None, DayOfWeek::Saturday, "R101", (8, 0), (9, 0));
        assert!(!has_conflict(&candidate, &[], None));
    }

    #[test]
    fn test_time_range_validation() {
        assert!(TimeRange::new(time(8, 0), time(8, 1)).is_ok());
        assert_eq!(
            TimeRange::new(time(10, 0), time(10, 0)),
            Err(ScheduleError::InvalidInterval {
                start: time(10, 0),
                end: time(10, 0)
            })
        );
        assert!(TimeRange::new(time(11, 0), time(10, 0)).is_err());
    }

    #[test]
    fn test_time_range_deserialize_validates() {
        let ok: TimeRange =
            serde_json::from_str(r#"{"start":"08:00:00","end":"10:00:00"}"#).unwrap();
        assert_eq!(ok.to_string(), "08:00-10:00");

        let err = serde_json::from_str::<TimeRange>(r#"{"start":"10:00:00","end":"08:00:00"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_slot_requires_room() {
        let range = TimeRange::new(time(8, 0), time(9, 0)).unwrap();
        assert_eq!(
            ScheduleSlot::new(None, DayOfWeek::Monday, "   ", range),
            Err(ScheduleError::EmptyRoom)
        );
    }

    #[test]
    fn test_day_of_week_ordinals() {
        assert_eq!(DayOfWeek::Monday.ordinal(), 1);
        assert_eq!(DayOfWeek::Saturday.ordinal(), 6);
        assert_eq!(DayOfWeek::from_ordinal(3), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::from_ordinal(0), None);
        assert_eq!(DayOfWeek::from_ordinal(7), None);
        assert_eq!(DayOfWeek::all().len(), 6);
    }

    #[test]
    fn test_day_of_week_parse() {
        assert_eq!(DayOfWeek::parse("monday").unwrap(), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::parse(" FRIDAY ").unwrap(), DayOfWeek::Friday);
        assert_eq!(
            DayOfWeek::parse("Sunday"),
            Err(ScheduleError::UnknownDay("Sunday".to_string()))
        );
        assert_eq!(DayOfWeek::Tuesday.to_string(), "Tuesday");
    }

    #[test]
    fn test_day_of_week_deserialize_ignores_case() {
        let day: DayOfWeek = serde_json::from_str(r#""monday""#).unwrap();
        assert_eq!(day, DayOfWeek::Monday);

        let day: DayOfWeek = serde_json::from_str(r#""SATURDAY""#).unwrap();
        assert_eq!(day, DayOfWeek::Saturday);

        assert_eq!(serde_json::to_string(&DayOfWeek::Monday).unwrap(), r#""Monday""#);
        assert!(serde_json::from_str::<DayOfWeek>(r#""Sunday""#).is_err());
    }
}
