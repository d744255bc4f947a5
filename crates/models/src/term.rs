use serde::{Deserialize, Deserializer, Serialize, de};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{Deref, RangeInclusive},
    str::FromStr,
};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;
use utoipa::ToSchema;

/// Starting years accepted for an academic year
pub const ACADEMIC_YEAR_RANGE: RangeInclusive<i16> = 1900..=2999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("academic year {0} is outside the range [1900, 2999]")]
    YearOutOfRange(i16),
    #[error("invalid academic year '{0}'")]
    InvalidYear(String),
}

/// Semester within an academic year
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
    StrumDisplay,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Semester {
    /// First semester, starting in the autumn
    Odd = 1,
    /// Second semester, starting in the spring
    Even = 2,
    /// Intersession between academic years
    Short = 3,
}

impl Semester {
    /// Position in the academic year, `1..=3`
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::iter().find(|semester| semester.ordinal() == ordinal)
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Semester> {
        Semester::iter().collect()
    }
}

// Same leniency as `FromStr`, so JSON bodies and CSV files accept the same names
impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_str(name.trim())
            .map_err(|_| de::Error::custom(format!("unknown semester: {name}")))
    }
}

/// Academic year, identified by the calendar year it starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcademicYear(pub i16);

impl AcademicYear {
    pub fn new(year: i16) -> Result<Self, TermError> {
        let year = AcademicYear(year);
        year.validate()?;
        Ok(year)
    }

    pub fn validate(&self) -> Result<(), TermError> {
        if ACADEMIC_YEAR_RANGE.contains(&self.0) {
            Ok(())
        } else {
            Err(TermError::YearOutOfRange(self.0))
        }
    }
}

impl Deref for AcademicYear {
    type Target = i16;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Accepts either `2024` or the displayed form `2024/2025`
impl FromStr for AcademicYear {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = s.split('/').next().unwrap_or_default().trim();
        let year = start
            .parse()
            .map_err(|_| TermError::InvalidYear(s.to_string()))?;

        AcademicYear::new(year)
    }
}

impl Display for AcademicYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.0, self.0.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_year_display() {
        assert_eq!(AcademicYear(2024).to_string(), "2024/2025");
    }

    #[test]
    fn test_academic_year_from_str() {
        assert_eq!(AcademicYear::from_str("2024").unwrap(), AcademicYear(2024));
        assert_eq!(
            AcademicYear::from_str("2023/2024").unwrap(),
            AcademicYear(2023)
        );
        assert_eq!(
            AcademicYear::from_str("next year").unwrap_err(),
            TermError::InvalidYear("next year".to_string())
        );
    }

    #[test]
    fn test_academic_year_range() {
        assert!(AcademicYear::new(1900).is_ok());
        assert!(AcademicYear::new(2999).is_ok());
        assert_eq!(
            AcademicYear::new(i16::MAX).unwrap_err(),
            TermError::YearOutOfRange(i16::MAX)
        );
        assert!(AcademicYear::from_str("32767").is_err());
        assert!(AcademicYear::from_str("-5").is_err());
    }

    #[test]
    fn test_academic_year_display_at_limit() {
        // Stored rows may predate validation
        assert_eq!(AcademicYear(i16::MAX).to_string(), "32767/32767");
    }

    #[test]
    fn test_semester_from_str() {
        assert_eq!(Semester::from_str("odd").unwrap(), Semester::Odd);
        assert_eq!(Semester::from_str("EVEN").unwrap(), Semester::Even);
        assert!(Semester::from_str("Summer").is_err());
        assert_eq!(Semester::all().len(), 3);
    }

    #[test]
    fn test_semester_order_follows_the_year() {
        assert!(Semester::Odd < Semester::Even);
        assert!(Semester::Even < Semester::Short);
        assert_eq!(Semester::from_ordinal(2), Some(Semester::Even));
        assert_eq!(Semester::from_ordinal(0), None);
    }

    #[test]
    fn test_semester_deserialize_ignores_case() {
        let semester: Semester = serde_json::from_str(r#""even""#).unwrap();
        assert_eq!(semester, Semester::Even);
        assert_eq!(serde_json::to_string(&Semester::Odd).unwrap(), r#""Odd""#);
        assert!(serde_json::from_str::<Semester>(r#""summer""#).is_err());
    }
}
