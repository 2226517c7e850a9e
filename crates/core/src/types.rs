//! Domain types for quiz slides and their questions.

use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Letters shown next to each option, in option order.
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// One unit of quiz content: an image reference and its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Page number in the source deck. Unique and sequence-ordered.
    pub page: u32,

    /// Image identifier. Not used by the quiz logic.
    #[serde(default)]
    pub image_id: String,

    /// Questions in display order.
    pub questions: Vec<Question>,
}

impl Slide {
    /// Create a slide with no questions.
    pub fn new(page: u32, image_id: impl Into<String>) -> Self {
        Self {
            page,
            image_id: image_id.into(),
            questions: Vec::new(),
        }
    }

    /// Add a question to this slide.
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Title shown above the slide.
    pub fn title(&self) -> String {
        format!("Slide {}", self.page)
    }

    /// Relative path of the rendered slide image.
    pub fn image_path(&self) -> String {
        format!("assets/images/slide_{}.png", self.page)
    }

    /// Get a question by its position on this slide.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// A multiple-choice prompt with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its slide.
    pub id: String,

    /// Prompt text.
    pub question: String,

    /// Canonical answer, shown when the user picks a wrong option.
    pub answer: String,

    /// Free-form tag such as "describe" or "identify".
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Answer options in display order.
    pub options: Vec<String>,

    /// Index into `options` of the correct option.
    pub correct_index: usize,
}

impl Question {
    /// Whether `option_index` is the correct option.
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    /// Check the option count and that `correct_index` points at an option.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.options.len() != OPTION_COUNT {
            return Err(format!(
                "expected {} options, found {}",
                OPTION_COUNT,
                self.options.len()
            ));
        }
        if self.correct_index >= self.options.len() {
            return Err(format!(
                "correct_index {} is out of range",
                self.correct_index
            ));
        }
        Ok(())
    }
}
