use chrono::NaiveDate;
use liftlog_domain as domain;
use liftlog_domain::statistics;

use crate::RestTimer;

/// Headline figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub workouts: usize,
    pub exercises: usize,
    pub volume: f32,
    pub streak: u32,
}

/// All client-side state of one app instance: the signed-in session, the
/// cached workout lists, the calendar cursor and the rest timer.
///
/// The workout lists mirror what the API returned last. They are replaced
/// wholesale after a fetch and never mutated in place.
pub struct AppState {
    session: Option<domain::Session>,
    workouts: Vec<domain::Workout>,
    public_workouts: Vec<domain::Workout>,
    calendar: domain::Calendar,
    rest_timer: RestTimer,
}

impl AppState {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            session: None,
            workouts: vec![],
            public_workouts: vec![],
            calendar: domain::Calendar::new(today),
            rest_timer: RestTimer::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&domain::Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: domain::Session) {
        self.session = Some(session);
    }

    /// Signing out also drops the cached workout lists.
    pub fn clear_session(&mut self) {
        self.session = None;
        self.workouts.clear();
        self.public_workouts.clear();
    }

    #[must_use]
    pub fn workouts(&self) -> &[domain::Workout] {
        &self.workouts
    }

    pub fn set_workouts(&mut self, workouts: Vec<domain::Workout>) {
        self.workouts = workouts;
    }

    #[must_use]
    pub fn public_workouts(&self) -> &[domain::Workout] {
        &self.public_workouts
    }

    pub fn set_public_workouts(&mut self, workouts: Vec<domain::Workout>) {
        self.public_workouts = workouts;
    }

    /// Looks up a cached workout by id without a round trip, checking the
    /// own list before the public one.
    #[must_use]
    pub fn workout(&self, id: domain::WorkoutID) -> Option<&domain::Workout> {
        self.workouts
            .iter()
            .chain(&self.public_workouts)
            .find(|workout| workout.id == id)
    }

    #[must_use]
    pub fn calendar(&self) -> &domain::Calendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut domain::Calendar {
        &mut self.calendar
    }

    #[must_use]
    pub fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    pub fn rest_timer_mut(&mut self) -> &mut RestTimer {
        &mut self.rest_timer
    }

    /// Dashboard figures over the own workout list.
    #[must_use]
    pub fn summary(&self, today: NaiveDate) -> Summary {
        Summary {
            workouts: statistics::workout_count(&self.workouts),
            exercises: statistics::exercise_count(&self.workouts),
            volume: statistics::total_volume(&self.workouts),
            streak: statistics::streak(&self.workouts, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn workout(id: u64, date_time: &str) -> domain::Workout {
        domain::Workout {
            id: id.into(),
            title: format!("Workout {id}"),
            date: date_time.parse().unwrap(),
            is_public: false,
            exercises: vec![domain::Exercise {
                name: String::from("Squat"),
                sets: vec![domain::Set {
                    weight: domain::Weight::new(100.0).unwrap(),
                    reps: domain::Reps::new(5).unwrap(),
                }],
            }],
        }
    }

    #[test]
    fn test_summary() {
        let mut state = AppState::new(date(2024, 3, 10));
        state.set_workouts(vec![
            workout(1, "2024-03-10T08:00:00"),
            workout(2, "2024-03-09T08:00:00"),
        ]);

        let summary = state.summary(date(2024, 3, 10));

        assert_eq!(summary.workouts, 2);
        assert_eq!(summary.exercises, 2);
        assert_eq!(summary.volume, 1000.0);
        assert_eq!(summary.streak, 2);
    }

    #[test]
    fn test_summary_of_empty_state() {
        let state = AppState::new(date(2024, 3, 10));
        let summary = state.summary(date(2024, 3, 10));

        assert_eq!(summary.workouts, 0);
        assert_eq!(summary.volume, 0.0);
        assert_eq!(summary.streak, 0);
    }

    #[test]
    fn test_workout_lookup_spans_both_lists() {
        let mut state = AppState::new(date(2024, 3, 10));
        state.set_workouts(vec![workout(1, "2024-03-10T08:00:00")]);
        state.set_public_workouts(vec![workout(2, "2024-03-09T08:00:00")]);

        assert_eq!(state.workout(1.into()).unwrap().id, 1.into());
        assert_eq!(state.workout(2.into()).unwrap().id, 2.into());
        assert_eq!(state.workout(3.into()), None);
    }

    #[test]
    fn test_clear_session_drops_caches() {
        let mut state = AppState::new(date(2024, 3, 10));
        state.set_session(domain::Session {
            token: String::from("token").into(),
            email: String::from("alice@example.com"),
        });
        state.set_workouts(vec![workout(1, "2024-03-10T08:00:00")]);

        state.clear_session();

        assert_eq!(state.session(), None);
        assert!(state.workouts().is_empty());
    }

    #[test]
    fn test_calendar_starts_on_current_month() {
        let state = AppState::new(date(2024, 12, 31));
        assert_eq!(state.calendar().year(), 2024);
        assert_eq!(state.calendar().month(), 12);
    }
}
