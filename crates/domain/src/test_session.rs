//! Timed test-session state machine.
//!
//! Drives one test attempt end-to-end: `NotStarted -> InProgress ->
//! Submitted`. The session owns the countdown bookkeeping and the captured
//! answers; the api layer supplies the one-second ticks and persists the
//! finished attempt.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::test::{Test, TestQuestion};
use crate::workflow::WorkflowError;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Submitted,
}

/// What a tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remains; the countdown continues.
    Running { remaining_seconds: u32 },
    /// The countdown hit zero; the caller must finalize with whatever
    /// answers were captured.
    Expired,
}

/// A finished attempt, ready to persist as one TestAttempt row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedAttempt {
    pub answers: BTreeMap<usize, String>,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: i32,
}

/// One in-flight test attempt.
#[derive(Debug, Clone)]
pub struct TestSession {
    questions: Vec<TestQuestion>,
    duration_seconds: u32,
    remaining_seconds: u32,
    answers: BTreeMap<usize, String>,
    state: SessionState,
    started_at: DateTime<Utc>,
}

impl TestSession {
    /// Starts a session for `test`.
    ///
    /// Refuses when the student already has an attempt for this test (the
    /// caller checks the store first and passes the verdict in) or when the
    /// test window is closed. On success the countdown is initialized to
    /// `duration_minutes * 60` seconds.
    pub fn start(
        test: &Test,
        already_attempted: bool,
        now: DateTime<Utc>,
    ) -> Result<Self, WorkflowError> {
        if already_attempted {
            return Err(WorkflowError::AlreadyAttempted);
        }
        if !test.is_open(now) {
            return Err(WorkflowError::TestClosed);
        }
        Ok(Self {
            questions: test.questions.clone(),
            duration_seconds: test.duration_seconds(),
            remaining_seconds: test.duration_seconds(),
            answers: BTreeMap::new(),
            state: SessionState::InProgress,
            started_at: now,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Records the selected option for a question, overwriting any previous
    /// selection (last write wins, no history).
    pub fn record_answer(
        &mut self,
        question_index: usize,
        selected_option: String,
    ) -> Result<(), WorkflowError> {
        if self.state != SessionState::InProgress {
            return Err(WorkflowError::SessionNotInProgress);
        }
        if question_index >= self.questions.len() {
            return Err(WorkflowError::QuestionOutOfRange(question_index));
        }
        self.answers.insert(question_index, selected_option);
        Ok(())
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.state != SessionState::InProgress {
            return Tick::Expired;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            Tick::Expired
        } else {
            Tick::Running {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    /// Finalizes the session, scoring whatever answers were captured.
    ///
    /// Best effort: unanswered questions count as incorrect, never blocking
    /// submission. Transitions to `Submitted`; the session cannot be resumed.
    pub fn finalize(&mut self) -> Result<CompletedAttempt, WorkflowError> {
        if self.state != SessionState::InProgress {
            return Err(WorkflowError::SessionNotInProgress);
        }
        self.state = SessionState::Submitted;

        let score = self
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.answers.get(index).map(String::as_str) == Some(question.correct_answer.as_str())
            })
            .count() as i32;

        Ok(CompletedAttempt {
            answers: std::mem::take(&mut self.answers),
            score,
            max_score: self.questions.len() as i32,
            time_taken_seconds: (self.duration_seconds - self.remaining_seconds) as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn question(text: &str, correct: &str) -> TestQuestion {
        TestQuestion {
            question: text.into(),
            options: vec!["a".into(), "b".into(), "c".into(), correct.into()],
            correct_answer: correct.into(),
        }
    }

    fn test_with(questions: Vec<TestQuestion>, duration_minutes: i32) -> Test {
        let now = Utc::now();
        Test {
            id: Uuid::new_v4(),
            title: "Weekly quiz".into(),
            subject: "Science".into(),
            class_id: None,
            questions,
            duration_minutes,
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: now,
        }
    }

    #[test]
    fn test_start_refused_when_already_attempted() {
        let test = test_with(vec![question("q1", "x")], 10);
        let err = TestSession::start(&test, true, Utc::now()).unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyAttempted);
    }

    #[test]
    fn test_start_refused_outside_window() {
        let mut test = test_with(vec![question("q1", "x")], 10);
        test.end_time = Utc::now() - Duration::minutes(5);
        let err = TestSession::start(&test, false, Utc::now()).unwrap_err();
        assert_eq!(err, WorkflowError::TestClosed);
    }

    #[test]
    fn test_countdown_initialized_from_duration() {
        let test = test_with(vec![question("q1", "x")], 10);
        let session = TestSession::start(&test, false, Utc::now()).unwrap();
        assert_eq!(session.remaining_seconds(), 600);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_answers_are_last_write_wins() {
        let test = test_with(vec![question("q1", "x"), question("q2", "y")], 10);
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        session.record_answer(0, "a".into()).unwrap();
        session.record_answer(0, "x".into()).unwrap();
        assert_eq!(session.answered_count(), 1);

        let attempt = session.finalize().unwrap();
        assert_eq!(attempt.answers.get(&0).map(String::as_str), Some("x"));
        assert_eq!(attempt.score, 1);
    }

    #[test]
    fn test_answer_out_of_range_rejected() {
        let test = test_with(vec![question("q1", "x")], 10);
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        let err = session.record_answer(3, "a".into()).unwrap_err();
        assert_eq!(err, WorkflowError::QuestionOutOfRange(3));
    }

    #[test]
    fn test_score_counts_exact_matches_only() {
        let test = test_with(
            vec![question("q1", "x"), question("q2", "y"), question("q3", "z")],
            10,
        );
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        session.record_answer(0, "x".into()).unwrap();
        session.record_answer(1, "wrong".into()).unwrap();
        // q3 left unanswered

        let attempt = session.finalize().unwrap();
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.max_score, 3);
    }

    #[test]
    fn test_expiry_forces_submission_with_partial_answers() {
        // Two questions, one minute; Q1 answered correctly, Q2 left blank,
        // timer allowed to run out.
        let test = test_with(vec![question("q1", "x"), question("q2", "y")], 1);
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        session.record_answer(0, "x".into()).unwrap();

        let mut expired = false;
        for _ in 0..60 {
            if session.tick() == Tick::Expired {
                expired = true;
                break;
            }
        }
        assert!(expired);

        let attempt = session.finalize().unwrap();
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.max_score, 2);
        assert_eq!(attempt.time_taken_seconds, 60);
    }

    #[test]
    fn test_early_submission_records_elapsed_time() {
        let test = test_with(vec![question("q1", "x")], 2);
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        for _ in 0..45 {
            session.tick();
        }
        let attempt = session.finalize().unwrap();
        assert_eq!(attempt.time_taken_seconds, 45);
    }

    #[test]
    fn test_session_is_torn_down_after_finalize() {
        let test = test_with(vec![question("q1", "x")], 1);
        let mut session = TestSession::start(&test, false, Utc::now()).unwrap();
        session.finalize().unwrap();

        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(
            session.record_answer(0, "x".into()).unwrap_err(),
            WorkflowError::SessionNotInProgress
        );
        assert_eq!(
            session.finalize().unwrap_err(),
            WorkflowError::SessionNotInProgress
        );
        assert_eq!(session.tick(), Tick::Expired);
    }
}
