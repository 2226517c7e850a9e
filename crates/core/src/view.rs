//! Post-transition snapshots for presentation layers.
//!
//! A presentation layer never reads the session directly. It takes a
//! [`SessionSnapshot`] after each transition and redraws from it.

use crate::session::{AnswerKey, QuizState, ScoreSummary, Session};
use crate::types::{Question, Slide, OPTION_LETTERS};
use serde::{Deserialize, Serialize};

/// Everything needed to redraw the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: QuizState,
    pub progress: Progress,
    /// The current slide, `None` only for an empty session.
    pub slide: Option<SlideView>,
    /// Whether the "previous" control is enabled.
    pub can_retreat: bool,
    pub next_label: NextLabel,
    /// Present once the quiz is completed.
    pub results: Option<ScoreSummary>,
}

/// Position within the slide sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based index of the current slide.
    pub current: usize,
    /// Number of slides.
    pub total: usize,
    /// Share of slides reached, in whole percent.
    pub percent: u32,
}

impl Progress {
    fn of(session: &Session) -> Self {
        let total = session.slides().len();
        let current = if total == 0 {
            0
        } else {
            session.current_index() + 1
        };
        let percent = if total == 0 {
            0
        } else {
            (current * 100 / total) as u32
        };
        Self {
            current,
            total,
            percent,
        }
    }
}

/// Label of the forward navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextLabel {
    Next,
    Finish,
}

impl NextLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextLabel::Next => "Next",
            NextLabel::Finish => "Finish",
        }
    }
}

/// A slide ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideView {
    pub page: u32,
    pub title: String,
    pub image_path: String,
    pub image_id: String,
    pub questions: Vec<QuestionView>,
}

/// A question with its lock state and option highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    /// 1-based position on the slide.
    pub number: usize,
    pub prompt: String,
    /// Answered; options no longer accept input.
    pub locked: bool,
    pub options: Vec<OptionView>,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub letter: char,
    pub text: String,
    pub status: OptionStatus,
}

/// Highlighting of a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionStatus {
    /// Question not answered yet; option can be picked.
    Available,
    /// Question answered; this option was neither picked nor correct.
    Disabled,
    /// The correct option of an answered question.
    Correct,
    /// The wrong option the user picked.
    Incorrect,
}

/// Right/wrong message shown under an answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

impl Feedback {
    pub fn for_answer(question: &Question, chosen: usize) -> Self {
        if question.is_correct(chosen) {
            Self {
                correct: true,
                message: "✓ Correct! Well done.".to_string(),
            }
        } else {
            Self {
                correct: false,
                message: format!("✗ Incorrect. The correct answer is: {}", question.answer),
            }
        }
    }
}

impl SessionSnapshot {
    /// Capture the current state of `session`.
    pub fn capture(session: &Session) -> Self {
        let slide = session
            .current_slide()
            .map(|slide| SlideView::build(slide, session.current_index(), session));
        let completed = session.state() == QuizState::Completed;

        Self {
            state: session.state(),
            progress: Progress::of(session),
            slide,
            can_retreat: !session.is_first_slide(),
            next_label: if session.is_last_slide() {
                NextLabel::Finish
            } else {
                NextLabel::Next
            },
            results: completed.then(|| session.score()),
        }
    }
}

impl SlideView {
    fn build(slide: &Slide, slide_index: usize, session: &Session) -> Self {
        let questions = slide
            .questions
            .iter()
            .enumerate()
            .map(|(q_index, question)| {
                let chosen = session.answer_for(AnswerKey::new(slide_index, q_index));
                QuestionView::build(question, q_index, chosen)
            })
            .collect();

        Self {
            page: slide.page,
            title: slide.title(),
            image_path: slide.image_path(),
            image_id: slide.image_id.clone(),
            questions,
        }
    }
}

impl QuestionView {
    fn build(question: &Question, index: usize, chosen: Option<usize>) -> Self {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(o_index, text)| OptionView {
                letter: OPTION_LETTERS.get(o_index).copied().unwrap_or('?'),
                text: text.clone(),
                status: option_status(question, o_index, chosen),
            })
            .collect();

        Self {
            id: question.id.clone(),
            number: index + 1,
            prompt: question.question.clone(),
            locked: chosen.is_some(),
            options,
            feedback: chosen.map(|c| Feedback::for_answer(question, c)),
        }
    }
}

fn option_status(question: &Question, option: usize, chosen: Option<usize>) -> OptionStatus {
    match chosen {
        None => OptionStatus::Available,
        Some(_) if question.is_correct(option) => OptionStatus::Correct,
        Some(c) if c == option => OptionStatus::Incorrect,
        Some(_) => OptionStatus::Disabled,
    }
}

impl Session {
    /// Snapshot for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self)
    }
}
