//! Plain-text rendering of session snapshots.
//!
//! Used by the terminal front end. Slides are drawn as a header, a progress
//! line and the questions with lettered options, separated by blank lines.

use crate::session::ScoreSummary;
use crate::view::{OptionStatus, QuestionView, SessionSnapshot, SlideView};

/// Renders snapshots as plain text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Whether answered options carry status marks.
    marks: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { marks: true }
    }
}

impl TextRenderer {
    /// Create a renderer with status marks enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable status marks next to answered options.
    pub fn with_marks(mut self, marks: bool) -> Self {
        self.marks = marks;
        self
    }

    /// Render the current slide, or the results once the quiz is completed.
    ///
    /// # Example output
    /// ```text
    /// Slide 2  (2/3)
    ///
    /// 1. Describe the pupil:
    ///    A) Irregular
    ///    B) Constricted  [x]
    ///    C) Dilated  [ok]
    ///    D) Normal
    ///    ✗ Incorrect. The correct answer is: Dilated
    ///
    /// [p] Previous   [n] Next
    /// ```
    pub fn render(&self, snapshot: &SessionSnapshot) -> String {
        if let Some(results) = &snapshot.results {
            return self.render_results(results);
        }

        let Some(slide) = &snapshot.slide else {
            return "No questions available.\n".to_string();
        };

        let mut out = format!(
            "{}  ({}/{})\n",
            slide.title, snapshot.progress.current, snapshot.progress.total
        );
        out.push_str(&self.render_questions(slide));
        out.push('\n');

        let mut controls = Vec::new();
        if snapshot.can_retreat {
            controls.push("[p] Previous".to_string());
        }
        controls.push(format!("[n] {}", snapshot.next_label.as_str()));
        out.push_str(&controls.join("   "));
        out.push('\n');
        out
    }

    /// Render the questions of a slide, one block per question.
    pub fn render_questions(&self, slide: &SlideView) -> String {
        slide
            .questions
            .iter()
            .map(|q| format!("\n{}", self.render_question(q)))
            .collect()
    }

    fn render_question(&self, question: &QuestionView) -> String {
        let mut out = format!("{}. {}\n", question.number, question.prompt);
        for option in &question.options {
            let mark = match (self.marks, option.status) {
                (true, OptionStatus::Correct) => "  [ok]",
                (true, OptionStatus::Incorrect) => "  [x]",
                _ => "",
            };
            out.push_str(&format!("   {}) {}{}\n", option.letter, option.text, mark));
        }
        if let Some(feedback) = &question.feedback {
            out.push_str(&format!("   {}\n", feedback.message));
        }
        out
    }

    /// Render the final score summary.
    pub fn render_results(&self, results: &ScoreSummary) -> String {
        format!(
            "Quiz complete!\n\nScore:    {}\nTotal:    {}\nAccuracy: {}%\n",
            results.correct, results.total_questions, results.accuracy
        )
    }
}
