use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::Workout;

/// One cell of the rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    pub workout_count: u32,
    pub today: bool,
}

/// Cursor over the month displayed in the workout history view.
///
/// The cursor is the only mutable state. The produced grid is a pure
/// function of the displayed month, the workout collection and today's
/// date. All date matching discards time components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    year: i32,
    month: u32,
}

impl Calendar {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
    }

    pub fn previous_month(&mut self) {
        if self.month == 1 {
            self.year -= 1;
            self.month = 12;
        } else {
            self.month -= 1;
        }
    }

    /// Number of empty cells before the first day of the month in a
    /// Sunday-first week grid.
    #[must_use]
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// One [`Day`] per calendar day of the displayed month.
    #[must_use]
    pub fn month_days(&self, workouts: &[Workout], today: NaiveDate) -> Vec<Day> {
        self.first_day()
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .map(|date| Day {
                date,
                workout_count: self.workout_count_on(date, workouts),
                today: date == today,
            })
            .collect()
    }

    /// The distinct days of the displayed month with at least one workout.
    #[must_use]
    pub fn workout_dates(&self, workouts: &[Workout]) -> BTreeSet<NaiveDate> {
        workouts
            .iter()
            .map(Workout::day)
            .filter(|d| d.year() == self.year && d.month() == self.month)
            .collect()
    }

    #[must_use]
    pub fn workout_count_on(&self, date: NaiveDate, workouts: &[Workout]) -> u32 {
        u32::try_from(self.workouts_on(date, workouts).len()).unwrap_or(u32::MAX)
    }

    /// The workouts recorded on the given calendar day.
    #[must_use]
    pub fn workouts_on<'a>(&self, date: NaiveDate, workouts: &'a [Workout]) -> Vec<&'a Workout> {
        workouts.iter().filter(|w| w.day() == date).collect()
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }
}
