use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};

use crate::{CreateError, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError>;
    async fn read_public_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, draft: WorkoutDraft) -> Result<Workout, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError>;
    async fn get_public_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, draft: WorkoutDraft) -> Result<Workout, CreateError>;
}

/// Pagination window for the workout list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

#[derive(
    Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct WorkoutID(u64);

impl From<u64> for WorkoutID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 2.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.5 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.5 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// One performance unit of an exercise: a weight moved for a number of reps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub weight: Weight,
    pub reps: Reps,
}

impl Set {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        {
            f32::from(*self)
        }
    }
}

impl From<Set> for f32 {
    fn from(value: Set) -> Self {
        #[allow(clippy::cast_precision_loss)]
        {
            Into::<f32>::into(value.weight) * Into::<u32>::into(value.reps) as f32
        }
    }
}

/// A named movement within a workout. Order of sets is significant and the
/// name is not guaranteed to be unique within or across workouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(Set::volume).sum()
    }
}

/// A dated collection of exercises fetched from the remote API.
///
/// Workouts are display-only on the client and never mutated locally.
/// Historical data is trusted as-is, without re-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutID,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(with = "api_date")]
    pub date: NaiveDateTime,
    pub is_public: bool,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(Exercise::volume).sum()
    }

    /// The calendar day this workout belongs to, with any time component
    /// discarded.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// The API serializes workout dates as ISO 8601 date-times, but dates
/// created from the form arrive without a time component.
mod api_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        if let Ok(date_time) = value.parse::<NaiveDateTime>() {
            return Ok(date_time);
        }
        value
            .parse::<NaiveDate>()
            .map(|date| date.and_hms_opt(0, 0, 0).unwrap())
            .map_err(de::Error::custom)
    }
}

/// Payload for creating a workout via the remote API.
///
/// Unlike [`Workout`], a draft is validated on construction: a workout must
/// contain at least one exercise and every exercise at least one set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDraft {
    pub title: Name,
    pub date: NaiveDate,
    pub is_public: bool,
    pub exercises: Vec<Exercise>,
}

impl WorkoutDraft {
    pub fn new(
        title: Name,
        date: NaiveDate,
        is_public: bool,
        exercises: Vec<Exercise>,
    ) -> Result<Self, WorkoutDraftError> {
        if exercises.is_empty() {
            return Err(WorkoutDraftError::NoExercises);
        }

        if exercises.iter().any(|e| e.sets.is_empty()) {
            return Err(WorkoutDraftError::NoSets);
        }

        Ok(Self {
            title,
            date,
            is_public,
            exercises,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutDraftError {
    #[error("Please add at least one exercise")]
    NoExercises,
    #[error("Each exercise must have at least one set")]
    NoSets,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skip={}&limit={}", self.skip, self.limit)
    }
}
