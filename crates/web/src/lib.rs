//! WASM bindings for the slideshow quiz.
//!
//! This crate exposes the quiz session to browser JavaScript. The page
//! calls [`load_quiz`] once, then drives the returned [`QuizHandle`] from
//! its event handlers and redraws from [`QuizHandle::snapshot`].

mod fetch;

use quiz_core::{
    fallback_slides, LoadedSlides, Loader, Origin, Session, StaticSource, DEFAULT_LOCATION,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use fetch::DEFAULT_TIMEOUT_MS;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
}

/// Fetch the question document and build a quiz.
///
/// # Arguments
/// * `url` - Location of the question document (default: `questions_data_with_options.json`)
/// * `timeout_ms` - How long to wait before using the built-in questions (default: 10000)
///
/// # Returns
/// A promise for a `QuizHandle`. Never rejects: any failure yields the built-in questions.
#[wasm_bindgen]
pub async fn load_quiz(url: Option<String>, timeout_ms: Option<i32>) -> Result<QuizHandle, JsValue> {
    let url = url.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let timeout_ms = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

    let loaded = match fetch::fetch_text(&url, timeout_ms).await {
        Ok(body) => Loader::new(StaticSource::new(body)).load(),
        Err(e) => {
            log::warn!("Could not fetch {}: {}; using built-in questions", url, e);
            LoadedSlides {
                slides: fallback_slides(),
                origin: Origin::Fallback,
            }
        }
    };

    Ok(QuizHandle::from_loaded(loaded))
}

/// A quiz session owned by the page.
#[wasm_bindgen]
pub struct QuizHandle {
    session: Session,
    origin: Origin,
}

impl QuizHandle {
    fn from_loaded(loaded: LoadedSlides) -> Self {
        Self {
            session: Session::new(loaded.slides),
            origin: loaded.origin,
        }
    }
}

#[wasm_bindgen]
impl QuizHandle {
    /// Build a quiz from an already-fetched document body.
    pub fn from_json(json: &str) -> QuizHandle {
        Self::from_loaded(Loader::new(StaticSource::new(json)).load())
    }

    /// Whether the built-in questions replaced the requested document.
    pub fn used_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    /// Record an answer. Returns `{ outcome: "recorded", correct }`, `{ outcome: "locked" }`
    /// or `{ outcome: "ignored" }`.
    pub fn select_answer(
        &mut self,
        slide_index: usize,
        question_index: usize,
        option_index: usize,
    ) -> Result<JsValue, JsValue> {
        to_js(&self.session.select_answer(slide_index, question_index, option_index))
    }

    /// Record an answer for a question on the current slide.
    pub fn select_current(&mut self, question_index: usize, option_index: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.select_current(question_index, option_index))
    }

    /// Returns `{ kind: "moved", index }` or `{ kind: "finished", summary }`.
    pub fn advance(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.advance())
    }

    /// Returns the new slide index, or `undefined` if nothing moved.
    pub fn retreat(&mut self) -> Option<usize> {
        self.session.retreat()
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn score(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.score())
    }

    /// Everything the page needs to redraw.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Advance, QuizState};

    const ONE_SLIDE: &str = r#"[{"page": 4, "image_id": "slide_4", "questions": [
        {"id": "q4_1", "question": "Q?", "answer": "B", "type": "identify",
         "options": ["A", "B", "C", "D"], "correct_index": 1}
    ]}]"#;

    #[test]
    fn test_from_json() {
        let handle = QuizHandle::from_json(ONE_SLIDE);
        assert!(!handle.used_fallback());
        assert_eq!(handle.total_questions(), 1);
        assert_eq!(handle.session.slides()[0].page, 4);
    }

    #[test]
    fn test_from_json_falls_back() {
        let handle = QuizHandle::from_json("{\"error\": \"not found\"}");
        assert!(handle.used_fallback());
        assert_eq!(handle.total_questions(), 2);
    }

    #[test]
    fn test_handle_drives_session() {
        let mut handle = QuizHandle::from_json(ONE_SLIDE);
        handle.start();
        assert!(handle.session.select_current(0, 1).is_correct());
        assert_eq!(handle.retreat(), None);
        assert!(matches!(handle.session.advance(), Advance::Finished { .. }));
        assert_eq!(handle.session.state(), QuizState::Completed);

        handle.restart();
        assert_eq!(handle.current_index(), 0);
        assert_eq!(handle.session.answered_count(), 0);
    }
}
