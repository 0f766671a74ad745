#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod calendar;
mod error;
mod name;
mod service;
mod session;
pub mod statistics;
mod template;
mod workout;

pub use calendar::{Calendar, Day};
pub use error::{CreateError, DeleteError, ReadError, StorageError};
pub use name::{Name, NameError};
pub use service::Service;
pub use session::{AccessToken, Session, SessionRepository, SessionService};
pub use statistics::PersonalRecord;
pub use template::{
    Template, TemplateDraft, TemplateDraftError, TemplateID, TemplateRepository, TemplateService,
};
pub use workout::{
    Exercise, Page, Reps, RepsError, Set, Weight, WeightError, Workout, WorkoutDraft,
    WorkoutDraftError, WorkoutID, WorkoutRepository, WorkoutService,
};
