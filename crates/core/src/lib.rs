//! Core domain types, slide loading, the quiz session state machine,
//! scoring, and render snapshots for the slideshow quiz.

pub mod error;
pub mod loader;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use loader::{
    fallback_slides, parse_slides, FileSource, LoadedSlides, Loader, Origin, SlideSource,
    StaticSource, DEFAULT_LOCATION,
};
pub use render::TextRenderer;
pub use session::{
    Advance, AnswerKey, AnswerOutcome, Answers, QuizState, ScoreSummary, Session, SessionEvent,
};
pub use types::{Question, Slide, OPTION_COUNT, OPTION_LETTERS};
pub use view::{
    Feedback, NextLabel, OptionStatus, OptionView, Progress, QuestionView, SessionSnapshot,
    SlideView,
};
