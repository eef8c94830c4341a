//! Randomized greedy timetable builder.
//!
//! # Algorithm
//!
//! 1. Enumerate the slot space: active study days × periods.
//! 2. Shuffle it with the caller's RNG.
//! 3. For each subject assignment (in supplied order), pop slots off the
//!    front of the pool and accept every candidate that passes
//!    [`check_all_conflicts`] against other divisions' sessions plus the
//!    sessions accepted so far, until the weekly frequency is met.
//! 4. Stop an assignment after `max_attempts` draws or when the pool is
//!    empty. Any unplaced remainder fails the whole build.
//!
//! Popped slots never return to the pool, even when rejected. No
//! backtracking, no optimization.
//!
//! # Complexity
//! O(a × k × n) where a=assignments, k=attempt cap, n=sessions checked
//! per candidate.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{BuilderConfig, SlotPoolStrategy};
use crate::conflict::check_all_conflicts;
use crate::error::{BuildError, ExhaustionCause};
use crate::models::{
    slot_space, Session, StudyDay, SubjectAssignment, TeacherAvailability, TimeSlot, Weekday,
};
use crate::validation::validate_request;

/// Input container for one division's build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Division being scheduled.
    pub division_id: u32,
    /// Weekly requirements, placed in this order.
    pub assignments: Vec<SubjectAssignment>,
    /// Study days (only active ones are used).
    pub study_days: Vec<StudyDay>,
    /// Periods per day. `None` or `Some(0)` = builder default.
    pub max_sessions_per_day: Option<u32>,
    /// Sessions already scheduled for other divisions.
    pub other_sessions: Vec<Session>,
    /// Teacher availability records. Empty = everyone always available.
    pub teacher_availability: Vec<TeacherAvailability>,
}

impl BuildRequest {
    /// Creates a request over an ordered list of active days.
    pub fn new(division_id: u32, assignments: Vec<SubjectAssignment>, days: Vec<Weekday>) -> Self {
        Self {
            division_id,
            assignments,
            study_days: StudyDay::from_ordered(&days),
            max_sessions_per_day: None,
            other_sessions: Vec::new(),
            teacher_availability: Vec::new(),
        }
    }

    /// Replaces the study days with full records.
    pub fn with_study_days(mut self, days: Vec<StudyDay>) -> Self {
        self.study_days = days;
        self
    }

    /// Sets the periods per day. Zero falls back to the builder default.
    pub fn with_max_sessions_per_day(mut self, max: u32) -> Self {
        self.max_sessions_per_day = Some(max);
        self
    }

    /// Sets the sessions already booked by other divisions.
    pub fn with_other_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.other_sessions = sessions;
        self
    }

    /// Sets teacher availability records.
    pub fn with_teacher_availability(mut self, availability: Vec<TeacherAvailability>) -> Self {
        self.teacher_availability = availability;
        self
    }
}

/// Randomized greedy timetable builder.
///
/// Places every required session of one division into the weekly grid,
/// or fails naming the first subject it could not fully place.
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_timetable::models::{SubjectAssignment, Weekday};
/// use u_timetable::scheduler::{BuildRequest, TimetableBuilder};
///
/// let request = BuildRequest::new(
///     1,
///     vec![SubjectAssignment::new(1, 1, 1, 1, 5).with_subject_name("Mathematics")],
///     vec![Weekday::Sunday, Weekday::Monday, Weekday::Tuesday],
/// );
///
/// let builder = TimetableBuilder::new();
/// let sessions = builder
///     .build(&request, &mut StdRng::seed_from_u64(7))
///     .unwrap();
/// assert_eq!(sessions.len(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableBuilder {
    config: BuilderConfig,
}

impl TimetableBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builds one division's timetable.
    ///
    /// Returns the accepted sessions (unsaved, linked to their assignment).
    /// On failure nothing is returned; the caller keeps its previous
    /// schedule.
    pub fn build<R: Rng + ?Sized>(
        &self,
        request: &BuildRequest,
        rng: &mut R,
    ) -> Result<Vec<Session>, BuildError> {
        // Zero on the request means "not set"
        let max_per_day = request
            .max_sessions_per_day
            .filter(|&max| max > 0)
            .unwrap_or(self.config.max_sessions_per_day);

        validate_request(request, max_per_day).map_err(BuildError::InvalidInput)?;

        let slots = slot_space(&request.study_days, max_per_day);
        let mut accepted: Vec<Session> = Vec::new();

        let demand: u64 = request
            .assignments
            .iter()
            .map(|a| u64::from(a.weekly_frequency))
            .sum();
        if demand > slots.len() as u64 {
            warn!(
                division_id = request.division_id,
                demand,
                slots = slots.len(),
                "Weekly demand exceeds the slot space"
            );
        }

        debug!(
            division_id = request.division_id,
            assignments = request.assignments.len(),
            slots = slots.len(),
            strategy = ?self.config.pool_strategy,
            "Building timetable"
        );

        match self.config.pool_strategy {
            SlotPoolStrategy::Shared => {
                let mut pool = shuffled(slots, rng);
                for assignment in &request.assignments {
                    self.place_assignment(request, assignment, &mut pool, &mut accepted)?;
                }
            }
            SlotPoolStrategy::PerAssignment => {
                for assignment in &request.assignments {
                    let occupied: HashSet<TimeSlot> = accepted.iter().map(|s| s.slot).collect();
                    let free: Vec<TimeSlot> = slots
                        .iter()
                        .copied()
                        .filter(|slot| !occupied.contains(slot))
                        .collect();
                    let mut pool = shuffled(free, rng);
                    self.place_assignment(request, assignment, &mut pool, &mut accepted)?;
                }
            }
        }

        info!(
            division_id = request.division_id,
            sessions = accepted.len(),
            "Timetable built"
        );

        Ok(accepted)
    }

    /// Builds one division's timetable with a thread-local RNG.
    pub fn build_with_entropy(&self, request: &BuildRequest) -> Result<Vec<Session>, BuildError> {
        self.build(request, &mut rand::rng())
    }

    /// Builds several divisions one after another.
    ///
    /// Each division sees the sessions placed for earlier divisions in this
    /// call as already booked. Stops at the first failure.
    pub fn build_divisions<R: Rng + ?Sized>(
        &self,
        requests: &[BuildRequest],
        rng: &mut R,
    ) -> Result<Vec<Session>, BuildError> {
        let mut placed: Vec<Session> = Vec::new();

        for request in requests {
            let mut request = request.clone();
            request.other_sessions.extend(placed.iter().cloned());
            let sessions = self.build(&request, rng)?;
            placed.extend(sessions);
        }

        Ok(placed)
    }

    /// Draws slots for one assignment until its weekly frequency is met.
    fn place_assignment(
        &self,
        request: &BuildRequest,
        assignment: &SubjectAssignment,
        pool: &mut VecDeque<TimeSlot>,
        accepted: &mut Vec<Session>,
    ) -> Result<(), BuildError> {
        let required = assignment.weekly_frequency;
        let mut remaining = required;
        let mut attempts = 0;

        while remaining > 0 && attempts < self.config.max_attempts {
            attempts += 1;

            let Some(slot) = pool.pop_front() else {
                break;
            };

            let candidate = assignment.session_at(slot);
            let check = check_all_conflicts(
                request.other_sessions.iter().chain(accepted.iter()),
                &candidate,
                required,
                &request.teacher_availability,
            );

            match check.kind {
                None => {
                    accepted.push(candidate);
                    remaining -= 1;
                }
                Some(kind) => {
                    debug!(
                        division_id = request.division_id,
                        subject_id = assignment.subject_id,
                        slot = %slot,
                        conflict = %kind,
                        "Slot rejected"
                    );
                }
            }
        }

        if remaining > 0 {
            let cause = if pool.is_empty() {
                ExhaustionCause::SlotPoolEmpty
            } else {
                ExhaustionCause::AttemptLimit
            };

            warn!(
                division_id = request.division_id,
                subject_id = assignment.subject_id,
                scheduled = required - remaining,
                required,
                attempts,
                ?cause,
                "Could not schedule subject"
            );

            return Err(BuildError::SchedulingExhausted {
                subject_id: assignment.subject_id,
                subject_name: assignment.display_name(),
                scheduled: required - remaining,
                required,
                cause,
            });
        }

        Ok(())
    }
}

fn shuffled<R: Rng + ?Sized>(mut slots: Vec<TimeSlot>, rng: &mut R) -> VecDeque<TimeSlot> {
    slots.shuffle(rng);
    VecDeque::from(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timetable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WEEK: [Weekday; 5] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
    ];

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn assignment(id: u32, subject: u32, teacher: u32, frequency: u32) -> SubjectAssignment {
        SubjectAssignment::new(id, 1, subject, teacher, frequency)
            .with_subject_name(format!("Subject {subject}"))
    }

    fn busy(division: u32, teacher: u32, day: Weekday, period: u32) -> Session {
        Session::new(division, teacher, 99, TimeSlot::new(day, period))
    }

    #[test]
    fn test_single_assignment_five_sessions() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 5)], WEEK.to_vec())
            .with_max_sessions_per_day(8);

        let sessions = TimetableBuilder::new().build(&request, &mut rng(42)).unwrap();

        assert_eq!(sessions.len(), 5);
        let slots: HashSet<TimeSlot> = sessions.iter().map(|s| s.slot).collect();
        assert_eq!(slots.len(), 5);
        for s in &sessions {
            assert!(WEEK.contains(&s.day()));
            assert!((1..=8).contains(&s.period()));
            assert_eq!(s.division_id, 1);
            assert_eq!(s.subject_assignment_id, Some(1));
            assert_eq!(s.id, None);
        }
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let request = BuildRequest::new(
            1,
            vec![assignment(1, 1, 1, 4), assignment(2, 2, 2, 3)],
            WEEK.to_vec(),
        );
        let builder = TimetableBuilder::new();

        let a = builder.build(&request, &mut rng(7)).unwrap();
        let b = builder.build(&request, &mut rng(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_multiple_assignments_respect_invariants() {
        let request = BuildRequest::new(
            1,
            vec![
                assignment(1, 1, 1, 5),
                assignment(2, 2, 2, 4),
                assignment(3, 3, 3, 3),
            ],
            WEEK.to_vec(),
        );

        let sessions = TimetableBuilder::new().build(&request, &mut rng(1)).unwrap();
        let timetable = Timetable::from(sessions);

        assert_eq!(timetable.session_count(), 12);
        assert!(timetable.is_conflict_free());
        assert_eq!(timetable.sessions_for_subject(1, 1).len(), 5);
        assert_eq!(timetable.sessions_for_subject(1, 2).len(), 4);
        assert_eq!(timetable.sessions_for_subject(1, 3).len(), 3);
    }

    #[test]
    fn test_avoids_teacher_booked_elsewhere() {
        // Teacher 1 teaches division 2 every Monday period
        let others: Vec<Session> = (1..=8).map(|p| busy(2, 1, Weekday::Monday, p)).collect();
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 5)], WEEK.to_vec())
            .with_other_sessions(others.clone());

        let sessions = TimetableBuilder::new().build(&request, &mut rng(3)).unwrap();
        assert_eq!(sessions.len(), 5);
        assert!(sessions.iter().all(|s| s.day() != Weekday::Monday));

        let mut all = Timetable::from(others);
        for s in sessions {
            all.add_session(s);
        }
        assert!(all.is_conflict_free());
    }

    #[test]
    fn test_teacher_availability_honored() {
        let availability = vec![TeacherAvailability::new(1).with_day(Weekday::Monday, 3)];
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 3)], WEEK.to_vec())
            .with_teacher_availability(availability);

        let sessions = TimetableBuilder::new().build(&request, &mut rng(11)).unwrap();
        let mut slots: Vec<TimeSlot> = sessions.iter().map(|s| s.slot).collect();
        slots.sort();
        assert_eq!(
            slots,
            vec![
                TimeSlot::new(Weekday::Monday, 1),
                TimeSlot::new(Weekday::Monday, 2),
                TimeSlot::new(Weekday::Monday, 3),
            ]
        );
    }

    #[test]
    fn test_exhausted_pool_names_subject() {
        // 2 slots, teacher busy in one of them, 2 sessions required
        let request = BuildRequest::new(1, vec![assignment(1, 4, 1, 2)], vec![Weekday::Monday])
            .with_max_sessions_per_day(2)
            .with_other_sessions(vec![busy(2, 1, Weekday::Monday, 1)]);

        let err = TimetableBuilder::new()
            .build(&request, &mut rng(5))
            .unwrap_err();

        assert_eq!(err.subject_name(), Some("Subject 4"));
        assert_eq!(
            err,
            BuildError::SchedulingExhausted {
                subject_id: 4,
                subject_name: "Subject 4".into(),
                scheduled: 1,
                required: 2,
                cause: ExhaustionCause::SlotPoolEmpty,
            }
        );
    }

    #[test]
    fn test_over_demand_names_first_unplaceable_subject() {
        // 7 sessions over 6 slots: Mathematics fills 4, Physics gets the last 2
        let request = BuildRequest::new(
            1,
            vec![
                SubjectAssignment::new(1, 1, 1, 1, 4).with_subject_name("Mathematics"),
                SubjectAssignment::new(2, 1, 2, 2, 3).with_subject_name("Physics"),
            ],
            vec![Weekday::Monday],
        )
        .with_max_sessions_per_day(6);

        let err = TimetableBuilder::new()
            .build(&request, &mut rng(11))
            .unwrap_err();

        assert_eq!(err.subject_name(), Some("Physics"));
        assert_eq!(
            err,
            BuildError::SchedulingExhausted {
                subject_id: 2,
                subject_name: "Physics".into(),
                scheduled: 2,
                required: 3,
                cause: ExhaustionCause::SlotPoolEmpty,
            }
        );
    }

    #[test]
    fn test_zero_request_max_uses_config_default() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 10)], vec![Weekday::Monday])
            .with_max_sessions_per_day(0);
        let builder =
            TimetableBuilder::new().with_config(BuilderConfig::new().with_max_sessions_per_day(10));

        let sessions = builder.build(&request, &mut rng(6)).unwrap();
        assert_eq!(sessions.len(), 10);
        assert!(sessions.iter().all(|s| (1..=10).contains(&s.period())));
    }

    #[test]
    fn test_attempt_limit() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 1)], vec![Weekday::Monday])
            .with_max_sessions_per_day(2)
            .with_other_sessions(vec![
                busy(2, 1, Weekday::Monday, 1),
                busy(3, 1, Weekday::Monday, 2),
            ]);
        let builder = TimetableBuilder::new().with_config(BuilderConfig::new().with_max_attempts(1));

        match builder.build(&request, &mut rng(9)) {
            Err(BuildError::SchedulingExhausted {
                scheduled, cause, ..
            }) => {
                assert_eq!(scheduled, 0);
                assert_eq!(cause, ExhaustionCause::AttemptLimit);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_request_rejected() {
        let request = BuildRequest::new(1, vec![], WEEK.to_vec());
        let err = TimetableBuilder::new()
            .build(&request, &mut rng(0))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidInput(ref errors) if !errors.is_empty()));
    }

    #[test]
    fn test_request_max_overrides_config() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 4)], WEEK.to_vec())
            .with_max_sessions_per_day(1);
        let builder =
            TimetableBuilder::new().with_config(BuilderConfig::new().with_max_sessions_per_day(8));

        let sessions = builder.build(&request, &mut rng(2)).unwrap();
        assert!(sessions.iter().all(|s| s.period() == 1));
    }

    #[test]
    fn test_study_day_sessions_count() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 3)], vec![])
            .with_study_days(vec![
                StudyDay::new(Weekday::Monday, 0).with_sessions_count(2),
                StudyDay::new(Weekday::Tuesday, 1).with_sessions_count(1),
                StudyDay::new(Weekday::Wednesday, 2).inactive(),
            ]);

        let sessions = TimetableBuilder::new().build(&request, &mut rng(4)).unwrap();
        let mut slots: Vec<TimeSlot> = sessions.iter().map(|s| s.slot).collect();
        slots.sort();
        assert_eq!(
            slots,
            vec![
                TimeSlot::new(Weekday::Monday, 1),
                TimeSlot::new(Weekday::Monday, 2),
                TimeSlot::new(Weekday::Tuesday, 1),
            ]
        );
    }

    #[test]
    fn test_shared_pool_can_starve_later_assignment() {
        // Teacher 1 is booked at Monday/1, so assignment 1 must take
        // Monday/2. Under the shared pool, drawing Monday/1 first burns it
        // and leaves nothing for assignment 2.
        let request = BuildRequest::new(
            1,
            vec![assignment(1, 1, 1, 1), assignment(2, 2, 2, 1)],
            vec![Weekday::Monday],
        )
        .with_max_sessions_per_day(2)
        .with_other_sessions(vec![busy(2, 1, Weekday::Monday, 1)]);

        let shared = TimetableBuilder::new();
        let failures = (0..64)
            .filter(|&seed| shared.build(&request, &mut rng(seed)).is_err())
            .count();
        assert!(failures > 0);

        let per_assignment = TimetableBuilder::new().with_config(
            BuilderConfig::new().with_pool_strategy(SlotPoolStrategy::PerAssignment),
        );
        for seed in 0..64 {
            let sessions = per_assignment.build(&request, &mut rng(seed)).unwrap();
            assert_eq!(sessions.len(), 2);
        }
    }

    #[test]
    fn test_accepted_sessions_pass_recheck() {
        let others: Vec<Session> = (1..=4)
            .map(|p| busy(2, 2, Weekday::Tuesday, p))
            .collect();
        let request = BuildRequest::new(
            1,
            vec![assignment(1, 1, 1, 3), assignment(2, 2, 2, 3)],
            WEEK.to_vec(),
        )
        .with_max_sessions_per_day(4)
        .with_other_sessions(others.clone());

        let sessions = TimetableBuilder::new().build(&request, &mut rng(21)).unwrap();
        assert!(sessions
            .iter()
            .filter(|s| s.teacher_id == 2)
            .all(|s| s.day() != Weekday::Tuesday));

        for (i, session) in sessions.iter().enumerate() {
            let rest: Vec<Session> = others
                .iter()
                .chain(
                    sessions
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, other)| other),
                )
                .cloned()
                .collect();
            let check = check_all_conflicts(&rest, session, 3, &[]);
            assert!(!check.has_conflict(), "{session:?} fails re-check: {check:?}");
        }
    }

    #[test]
    fn test_build_divisions_shares_teachers() {
        let requests = vec![
            BuildRequest::new(
                1,
                vec![SubjectAssignment::new(1, 1, 1, 1, 2)],
                vec![Weekday::Monday],
            )
            .with_max_sessions_per_day(4),
            BuildRequest::new(
                2,
                vec![SubjectAssignment::new(2, 2, 1, 1, 2)],
                vec![Weekday::Monday],
            )
            .with_max_sessions_per_day(4),
        ];

        let sessions = TimetableBuilder::new()
            .build_divisions(&requests, &mut rng(8))
            .unwrap();
        let timetable = Timetable::from(sessions);

        assert_eq!(timetable.session_count(), 4);
        assert_eq!(timetable.sessions_for_teacher(1).len(), 4);
        assert!(timetable.is_conflict_free());
    }

    #[test]
    fn test_build_with_entropy() {
        let request = BuildRequest::new(1, vec![assignment(1, 1, 1, 5)], WEEK.to_vec());
        let sessions = TimetableBuilder::new().build_with_entropy(&request).unwrap();
        assert_eq!(sessions.len(), 5);
    }
}
