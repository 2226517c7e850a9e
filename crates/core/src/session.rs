//! The quiz session state machine.
//!
//! A [`Session`] is created once the slides are loaded and lives for one
//! quiz attempt. Every operation is total: out-of-range indices and calls
//! that make no sense in the current state are no-ops, never panics.

use crate::types::Slide;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positional key of a question: slide index and index within the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub slide: usize,
    pub question: usize,
}

impl AnswerKey {
    pub fn new(slide: usize, question: usize) -> Self {
        Self { slide, question }
    }
}

/// Recorded answers: question key to chosen option index.
pub type Answers = BTreeMap<AnswerKey, usize>;

/// Lifecycle of one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    NotStarted,
    InProgress,
    Completed,
}

/// Inputs to [`QuizState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Answer,
    /// Advance request; `at_last` is true when the current slide is the last one.
    Advance { at_last: bool },
    /// Emitted only when the index actually moved back.
    Retreat,
    Restart,
}

impl QuizState {
    /// The state after `event`.
    ///
    /// `Completed` is left by `Restart`, or by `Retreat` off the last slide.
    pub fn apply(self, event: SessionEvent) -> QuizState {
        match (self, event) {
            (_, SessionEvent::Restart) => QuizState::InProgress,
            (QuizState::Completed, SessionEvent::Retreat) => QuizState::InProgress,
            (QuizState::Completed, _) => QuizState::Completed,
            (_, SessionEvent::Advance { at_last: true }) => QuizState::Completed,
            _ => QuizState::InProgress,
        }
    }
}

/// Result of selecting an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The answer was recorded and the question is now locked.
    Recorded { correct: bool },
    /// The question already had an answer; nothing changed.
    Locked,
    /// The indices do not name a question/option, or the quiz is over.
    Ignored,
}

impl AnswerOutcome {
    /// Whether a new answer was recorded and it was correct.
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Recorded { correct: true })
    }
}

/// Result of [`Session::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advance {
    /// Moved to the slide at `index`.
    Moved { index: usize },
    /// The quiz is complete.
    Finished { summary: ScoreSummary },
}

/// Final or running score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Answers matching the question's correct option.
    pub correct: usize,
    /// Questions answered so far.
    pub answered: usize,
    /// Questions across all slides.
    pub total_questions: usize,
    /// `round(correct / total_questions * 100)`, 0 when there are no questions.
    pub accuracy: u32,
}

/// Percentage of `correct` over `total`, rounded half up. Zero when `total` is zero.
pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 200 + total) / (total * 2)) as u32
}

/// Count answers that match their question's correct option.
///
/// Keys that name a slide or question missing from `slides` are skipped.
pub fn count_correct(slides: &[Slide], answers: &Answers) -> usize {
    answers
        .iter()
        .filter(|(key, option)| {
            slides
                .get(key.slide)
                .and_then(|slide| slide.question(key.question))
                .map(|question| question.is_correct(**option))
                .unwrap_or(false)
        })
        .count()
}

/// Mutable state of one quiz attempt.
#[derive(Debug, Clone)]
pub struct Session {
    slides: Vec<Slide>,
    current_index: usize,
    answers: Answers,
    total_questions: usize,
    state: QuizState,
}

impl Session {
    /// Create a session over loaded slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        let total_questions = slides.iter().map(|s| s.questions.len()).sum();
        Self {
            slides,
            current_index: 0,
            answers: Answers::new(),
            total_questions,
            state: QuizState::NotStarted,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The slide to render, `None` only for an empty session.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_index)
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// The option recorded for a question, if it has been answered.
    pub fn answer_for(&self, key: AnswerKey) -> Option<usize> {
        self.answers.get(&key).copied()
    }

    pub fn is_first_slide(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last_slide(&self) -> bool {
        self.current_index + 1 >= self.slides.len()
    }

    /// Move from `NotStarted` to `InProgress`.
    pub fn start(&mut self) {
        if self.state == QuizState::NotStarted {
            self.transition(SessionEvent::Start);
        }
    }

    /// Record an answer. Each question accepts exactly one answer until restart.
    pub fn select_answer(
        &mut self,
        slide_index: usize,
        question_index: usize,
        option_index: usize,
    ) -> AnswerOutcome {
        if self.state == QuizState::Completed {
            log::debug!("Ignoring answer after completion");
            return AnswerOutcome::Ignored;
        }

        let Some(question) = self
            .slides
            .get(slide_index)
            .and_then(|slide| slide.question(question_index))
        else {
            log::debug!(
                "Ignoring answer for unknown question {}/{}",
                slide_index,
                question_index
            );
            return AnswerOutcome::Ignored;
        };
        if option_index >= question.options.len() {
            return AnswerOutcome::Ignored;
        }

        let key = AnswerKey::new(slide_index, question_index);
        if self.answers.contains_key(&key) {
            return AnswerOutcome::Locked;
        }

        let correct = question.is_correct(option_index);
        self.answers.insert(key, option_index);
        self.start();
        self.transition(SessionEvent::Answer);

        AnswerOutcome::Recorded { correct }
    }

    /// Record an answer for a question on the current slide.
    pub fn select_current(&mut self, question_index: usize, option_index: usize) -> AnswerOutcome {
        self.select_answer(self.current_index, question_index, option_index)
    }

    /// Move to the next slide, or complete the quiz from the last one.
    ///
    /// Calling again once completed returns the same summary.
    pub fn advance(&mut self) -> Advance {
        if self.state == QuizState::Completed {
            return Advance::Finished {
                summary: self.score(),
            };
        }

        self.start();
        if self.is_last_slide() {
            self.transition(SessionEvent::Advance { at_last: true });
            let summary = self.score();
            log::info!(
                "Quiz completed: {}/{} correct ({}%)",
                summary.correct,
                summary.total_questions,
                summary.accuracy
            );
            return Advance::Finished { summary };
        }

        self.current_index += 1;
        self.transition(SessionEvent::Advance { at_last: false });
        Advance::Moved {
            index: self.current_index,
        }
    }

    /// Move to the previous slide. Returns the new index, or `None` if nothing moved.
    ///
    /// Moving back from a completed quiz reopens it; advancing from the last
    /// slide completes it again.
    pub fn retreat(&mut self) -> Option<usize> {
        self.start();
        if self.current_index == 0 {
            return None;
        }

        self.current_index -= 1;
        self.transition(SessionEvent::Retreat);
        Some(self.current_index)
    }

    /// Back to the first slide with no answers. Slides are kept.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.transition(SessionEvent::Restart);
    }

    /// Score the recorded answers.
    pub fn score(&self) -> ScoreSummary {
        let correct = count_correct(&self.slides, &self.answers);
        ScoreSummary {
            correct,
            answered: self.answers.len(),
            total_questions: self.total_questions,
            accuracy: accuracy(correct, self.total_questions),
        }
    }

    fn transition(&mut self, event: SessionEvent) {
        let next = self.state.apply(event);
        if next != self.state {
            log::debug!("Session {:?} -> {:?} on {:?}", self.state, next, event);
        }
        self.state = next;
    }
}
