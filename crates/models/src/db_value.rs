//! Column conversions for domain enums, enabled by the `database` feature

use crate::{grade::LetterGrade, schedule::DayOfWeek, term::Semester};
use sea_orm::{
    ColIdx, DbErr, QueryResult, TryGetError, TryGetable, Value,
    sea_query::{ArrayType, ColumnType, Nullable, ValueType, ValueTypeErr},
};
use std::str::FromStr;

/// Stores an enum as its string name in a text column
macro_rules! impl_text_value {
    ($ty:ty) => {
        impl ValueType for $ty {
            fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
                match v {
                    Value::String(Some(s)) => <$ty>::from_str(&s).map_err(|_| ValueTypeErr),
                    _ => Err(ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($ty).to_string()
            }

            fn array_type() -> ArrayType {
                ArrayType::String
            }

            fn column_type() -> ColumnType {
                ColumnType::Text
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::String(Some(Box::new(value.as_str().to_owned())))
            }
        }

        impl TryGetable for $ty {
            fn try_get_by<I: ColIdx>(res: &QueryResult, index: I) -> Result<Self, TryGetError> {
                let val: String = res.try_get_by(index)?;

                <$ty>::from_str(&val).map_err(|_| {
                    TryGetError::DbErr(DbErr::Type(format!(
                        "Invalid {} value: {val}",
                        stringify!($ty)
                    )))
                })
            }
        }

        impl Nullable for $ty {
            fn null() -> Value {
                Value::String(None)
            }
        }
    };
}

/// Stores an enum as its `u8` ordinal in a smallint column, so ordering by
/// the column follows the calendar rather than the alphabet
macro_rules! impl_ordinal_value {
    ($ty:ty) => {
        impl ValueType for $ty {
            fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
                match v {
                    Value::SmallInt(Some(n)) => <u8 as TryFrom<i16>>::try_from(n)
                        .ok()
                        .and_then(<$ty>::from_ordinal)
                        .ok_or(ValueTypeErr),
                    _ => Err(ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($ty).to_string()
            }

            fn array_type() -> ArrayType {
                ArrayType::SmallInt
            }

            fn column_type() -> ColumnType {
                ColumnType::SmallInteger
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::SmallInt(Some(i16::from(value.ordinal())))
            }
        }

        impl TryGetable for $ty {
            fn try_get_by<I: ColIdx>(res: &QueryResult, index: I) -> Result<Self, TryGetError> {
                let val: i16 = res.try_get_by(index)?;

                <u8 as TryFrom<i16>>::try_from(val)
                    .ok()
                    .and_then(<$ty>::from_ordinal)
                    .ok_or_else(|| {
                        TryGetError::DbErr(DbErr::Type(format!(
                            "Invalid {} ordinal: {val}",
                            stringify!($ty)
                        )))
                    })
            }
        }

        impl Nullable for $ty {
            fn null() -> Value {
                Value::SmallInt(None)
            }
        }
    };
}

impl_text_value!(LetterGrade);
impl_ordinal_value!(DayOfWeek);
impl_ordinal_value!(Semester);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_round_trips_through_ordinal() {
        let value: Value = DayOfWeek::Thursday.into();
        assert_eq!(value, Value::SmallInt(Some(4)));
        assert_eq!(
            <DayOfWeek as ValueType>::try_from(value).unwrap(),
            DayOfWeek::Thursday
        );
        assert!(<DayOfWeek as ValueType>::try_from(Value::SmallInt(Some(9))).is_err());
    }

    #[test]
    fn test_semester_stored_in_term_order() {
        let ordinals: Vec<Value> = Semester::all().into_iter().map(Value::from).collect();
        assert_eq!(
            ordinals,
            vec![
                Value::SmallInt(Some(1)),
                Value::SmallInt(Some(2)),
                Value::SmallInt(Some(3)),
            ]
        );
        assert_eq!(
            <Semester as ValueType>::try_from(Value::SmallInt(Some(2))).unwrap(),
            Semester::Even
        );
        assert!(<Semester as ValueType>::try_from(Value::SmallInt(Some(-1))).is_err());
    }

    #[test]
    fn test_letter_grade_stored_as_text() {
        let value: Value = LetterGrade::B.into();
        assert_eq!(value, Value::String(Some(Box::new("B".to_string()))));
        assert!(<LetterGrade as ValueType>::try_from(Value::String(Some(Box::new(
            "Z".to_string()
        ))))
        .is_err());
    }
}
