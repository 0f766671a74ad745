use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize, de};

use crate::{CreateError, DeleteError, Exercise, Name, ReadError, WorkoutDraft, WorkoutDraftError};

#[allow(async_fn_in_trait)]
pub trait TemplateRepository {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError>;
    async fn create_template(&self, draft: TemplateDraft) -> Result<Template, CreateError>;
    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait TemplateService {
    async fn get_templates(&self) -> Result<Vec<Template>, ReadError>;
    async fn get_template(&self, id: TemplateID) -> Result<Template, ReadError>;
    async fn create_template(&self, draft: TemplateDraft) -> Result<Template, CreateError>;
    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

/// Identifier of a locally stored template.
///
/// Assigned at save time from a millisecond timestamp. Stored as a decimal
/// string, matching the persisted JSON format. Collisions are assumed
/// impossible for single-tab usage, not structurally prevented.
#[derive(Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(u64);

impl TemplateID {
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_timestamp(time: DateTime<Utc>) -> Self {
        Self(time.timestamp_millis() as u64)
    }
}

impl From<u64> for TemplateID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for TemplateID {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TemplateID {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse::<u64>().map(Self).map_err(de::Error::custom)
    }
}

/// A reusable exercise blueprint, owned entirely by local storage.
///
/// A template shares the exercise shape with workouts but is a detached
/// copy: applying it pre-populates a new workout draft, after which the
/// two are disconnected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    #[serde(default)]
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Pre-populate a workout draft from this template.
    pub fn apply(&self, date: NaiveDate, is_public: bool) -> Result<WorkoutDraft, WorkoutDraftError> {
        WorkoutDraft::new(self.name.clone(), date, is_public, self.exercises.clone())
    }
}

/// Payload for saving a template. The id and creation timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub name: Name,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl TemplateDraft {
    pub fn new(
        name: Name,
        description: Option<String>,
        exercises: Vec<Exercise>,
    ) -> Result<Self, TemplateDraftError> {
        if exercises.is_empty() {
            return Err(TemplateDraftError::NoExercises);
        }

        if exercises.iter().any(|e| e.sets.is_empty()) {
            return Err(TemplateDraftError::NoSets);
        }

        Ok(Self {
            name,
            description,
            exercises,
        })
    }

    #[must_use]
    pub fn into_template(self, id: TemplateID, created_at: DateTime<Utc>) -> Template {
        Template {
            id,
            name: self.name,
            description: self.description,
            exercises: self.exercises,
            created_at,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TemplateDraftError {
    #[error("Please add at least one exercise")]
    NoExercises,
    #[error("Each exercise must have at least one set")]
    NoSets,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Reps, Set, Weight};

    use super::*;

    fn exercises() -> Vec<Exercise> {
        vec![Exercise {
            name: String::from("Bench Press"),
            sets: vec![Set {
                weight: Weight::new(80.0).unwrap(),
                reps: Reps::new(5).unwrap(),
            }],
        }]
    }

    fn template() -> Template {
        Template {
            id: 1_700_000_000_000.into(),
            name: Name::new("Push Day").unwrap(),
            description: Some(String::from("Chest and shoulders")),
            exercises: exercises(),
            created_at: "2024-01-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_template_id_from_timestamp() {
        let time: DateTime<Utc> = "2024-01-01T10:00:00Z".parse().unwrap();
        assert_eq!(
            TemplateID::from_timestamp(time),
            TemplateID(1_704_103_200_000)
        );
    }

    #[test]
    fn test_template_serialization_format() {
        let value = serde_json::to_value(template()).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["name"], "Push Day");
        assert_eq!(value["createdAt"], "2024-01-01T10:00:00Z");
        assert_eq!(value["exercises"][0]["sets"][0]["reps"], 5);

        let round_trip: Template = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip, template());
    }

    #[test]
    fn test_template_without_description() {
        let template: Template = serde_json::from_value(serde_json::json!({
            "id": "42",
            "name": "Pull Day",
            "exercises": [],
            "createdAt": "2024-01-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(template.description, None);
    }

    #[test]
    fn test_template_draft_new() {
        let draft =
            TemplateDraft::new(Name::new("Push Day").unwrap(), None, exercises()).unwrap();
        let template = draft
            .clone()
            .into_template(7.into(), "2024-01-01T10:00:00Z".parse().unwrap());
        assert_eq!(template.id, TemplateID(7));
        assert_eq!(template.name, draft.name);
        assert_eq!(template.exercises, exercises());
    }

    #[rstest]
    #[case::no_exercises(vec![], TemplateDraftError::NoExercises)]
    #[case::no_sets(
        vec![Exercise { name: String::from("Bench Press"), sets: vec![] }],
        TemplateDraftError::NoSets
    )]
    fn test_template_draft_new_invalid(
        #[case] exercises: Vec<Exercise>,
        #[case] expected: TemplateDraftError,
    ) {
        assert_eq!(
            TemplateDraft::new(Name::new("Push Day").unwrap(), None, exercises),
            Err(expected)
        );
    }

    #[test]
    fn test_template_apply() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let draft = template().apply(date, false).unwrap();
        assert_eq!(draft.title, Name::new("Push Day").unwrap());
        assert_eq!(draft.date, date);
        assert_eq!(draft.exercises, exercises());
    }
}
