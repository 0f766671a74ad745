//! Pure aggregations over a workout collection.
//!
//! Every function is deterministic, never fails and yields zero-valued or
//! empty results for an empty collection.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::{Exercise, Reps, Weight, Workout};

/// Days covered by the workout frequency histogram shown on the
/// statistics page.
pub const DEFAULT_FREQUENCY_DAYS: u32 = 30;

/// Exercises listed in the frequency ranking.
pub const RANKING_SIZE: usize = 10;

#[must_use]
pub fn workout_count(workouts: &[Workout]) -> usize {
    workouts.len()
}

#[must_use]
pub fn exercise_count(workouts: &[Workout]) -> usize {
    workouts.iter().map(|w| w.exercises.len()).sum()
}

#[must_use]
pub fn total_volume(workouts: &[Workout]) -> f32 {
    workouts.iter().map(Workout::volume).sum()
}

/// Consecutive calendar days with at least one workout, walking backward
/// from `today` until the first gap.
///
/// The i-th most recent distinct workout day continues the streak iff it
/// lies exactly i days before `today`. The first day is treated specially:
/// a streak may also start one day back, so a single workout yesterday
/// with nothing today still counts as a streak of 1, while a workout two
/// days back with nothing since counts as 0.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn streak(workouts: &[Workout], today: NaiveDate) -> u32 {
    let days = workouts
        .iter()
        .map(Workout::day)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>();

    let mut streak = 0;

    for (i, day) in days.iter().enumerate() {
        let diff = (today - *day).num_days();
        if diff == i as i64 || (i == 0 && diff == 1) {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// Number of workouts per day for the trailing `days` calendar days ending
/// at `today` inclusive.
///
/// The result always contains exactly `days` entries. Days without
/// workouts map to 0 and workouts outside the window are ignored.
#[must_use]
pub fn workout_frequency(
    workouts: &[Workout],
    today: NaiveDate,
    days: u32,
) -> BTreeMap<NaiveDate, u32> {
    let mut frequency = (0..days)
        .map(|i| (today - Duration::days(i64::from(i)), 0))
        .collect::<BTreeMap<_, _>>();

    for workout in workouts {
        if let Some(count) = frequency.get_mut(&workout.day()) {
            *count += 1;
        }
    }

    frequency
}

/// The most frequently performed exercises by exact name, descending by
/// count, limited to [`RANKING_SIZE`] entries.
///
/// Ties keep the order in which the names were first encountered.
#[must_use]
pub fn exercise_frequency(workouts: &[Workout]) -> Vec<(String, u32)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u32)> = Vec::new();

    for workout in workouts {
        for exercise in &workout.exercises {
            if let Some(&i) = index.get(exercise.name.as_str()) {
                counts[i].1 += 1;
            } else {
                index.insert(&exercise.name, counts.len());
                counts.push((&exercise.name, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(RANKING_SIZE);
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// Total volume per calendar day, ascending by date. Workouts sharing a
/// day are summed.
#[must_use]
pub fn volume_progress(workouts: &[Workout]) -> Vec<(NaiveDate, f32)> {
    let mut volume_by_day: BTreeMap<NaiveDate, f32> = BTreeMap::new();

    for workout in workouts {
        *volume_by_day.entry(workout.day()).or_insert(0.0) += workout.volume();
    }

    volume_by_day.into_iter().collect()
}

/// Best single-set weight, reps and volume for one exercise name.
///
/// The three maxima are tracked independently and may come from different
/// sets or workouts. `date` follows max-weight updates only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalRecord {
    pub max_weight: Weight,
    pub max_reps: Reps,
    pub max_volume: f32,
    pub date: NaiveDateTime,
}

#[must_use]
pub fn personal_records(workouts: &[Workout]) -> BTreeMap<String, PersonalRecord> {
    let mut records: BTreeMap<String, PersonalRecord> = BTreeMap::new();

    for workout in workouts {
        for Exercise { name, sets } in &workout.exercises {
            for set in sets {
                if let Some(record) = records.get_mut(name) {
                    if set.weight > record.max_weight {
                        record.max_weight = set.weight;
                        record.date = workout.date;
                    }
                    if set.reps > record.max_reps {
                        record.max_reps = set.reps;
                    }
                    if set.volume() > record.max_volume {
                        record.max_volume = set.volume();
                    }
                } else {
                    records.insert(
                        name.clone(),
                        PersonalRecord {
                            max_weight: set.weight,
                            max_reps: set.reps,
                            max_volume: set.volume(),
                            date: workout.date,
                        },
                    );
                }
            }
        }
    }

    records
}
