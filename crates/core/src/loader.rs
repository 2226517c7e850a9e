//! Loading slides from a question document.
//!
//! A [`SlideSource`] produces the raw JSON body. [`parse_slides`] turns it
//! into slides and drops any slide without questions. [`Loader::load`]
//! never fails: on any error it logs a warning and hands back the built-in
//! fallback dataset so the quiz is always playable.

use crate::error::{Error, Result};
use crate::types::{Question, Slide};
use std::path::{Path, PathBuf};

/// Where the question document lives unless told otherwise.
pub const DEFAULT_LOCATION: &str = "questions_data_with_options.json";

/// A place the raw question document can be fetched from.
pub trait SlideSource {
    /// Fetch the raw JSON body.
    fn fetch(&self) -> Result<String>;

    /// Human-readable description for log lines.
    fn describe(&self) -> String;
}

/// Reads the question document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlideSource for FileSource {
    fn fetch(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A question document that has already been fetched.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl SlideSource for StaticSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "in-memory document".to_string()
    }
}

/// Where a set of loaded slides came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from the configured source.
    Source,
    /// The source failed and the built-in dataset was used.
    Fallback,
}

/// Slides produced by [`Loader::load`].
#[derive(Debug, Clone)]
pub struct LoadedSlides {
    pub slides: Vec<Slide>,
    pub origin: Origin,
}

impl LoadedSlides {
    /// Whether the built-in dataset replaced the source.
    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }

    /// Sum of question counts across all slides.
    pub fn total_questions(&self) -> usize {
        self.slides.iter().map(|s| s.questions.len()).sum()
    }
}

/// Loads slides from a source, falling back to the built-in dataset.
pub struct Loader<S> {
    source: S,
}

impl<S: SlideSource> Loader<S> {
    /// Create a loader for the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and parse, reporting any failure.
    pub fn try_load(&self) -> Result<Vec<Slide>> {
        log::info!("Loading questions from {}", self.source.describe());
        let body = self.source.fetch()?;
        let slides = parse_slides(&body)?;
        if slides.is_empty() {
            return Err(Error::NoQuestions);
        }
        Ok(slides)
    }

    /// Fetch and parse, substituting the fallback dataset on any failure.
    pub fn load(&self) -> LoadedSlides {
        match self.try_load() {
            Ok(slides) => {
                log::debug!("Loaded {} slides", slides.len());
                LoadedSlides {
                    slides,
                    origin: Origin::Source,
                }
            }
            Err(e) => {
                log::warn!(
                    "Could not load questions from {}: {}; using built-in questions",
                    self.source.describe(),
                    e
                );
                LoadedSlides {
                    slides: fallback_slides(),
                    origin: Origin::Fallback,
                }
            }
        }
    }
}

/// Parse a question document, validating questions and dropping empty slides.
///
/// An empty result is not an error here; [`Loader::try_load`] decides that.
pub fn parse_slides(json: &str) -> Result<Vec<Slide>> {
    let raw: Vec<Slide> = serde_json::from_str(json)?;

    let mut slides = Vec::with_capacity(raw.len());
    for slide in raw {
        if slide.questions.is_empty() {
            log::debug!("Skipping page {} (no questions)", slide.page);
            continue;
        }
        for question in &slide.questions {
            question
                .validate()
                .map_err(|reason| Error::InvalidQuestion {
                    page: slide.page,
                    id: question.id.clone(),
                    reason,
                })?;
        }
        slides.push(slide);
    }

    Ok(slides)
}

/// The built-in dataset: one slide with two questions.
pub fn fallback_slides() -> Vec<Slide> {
    vec![Slide::new(2, "slide_2")
        .with_question(fallback_question(
            "q2_1",
            "Describe the pupil:",
            "Dilated",
            "describe",
            ["Irregular", "Constricted", "Dilated", "Normal"],
            2,
        ))
        .with_question(fallback_question(
            "q2_2",
            "Mention the autonomic nervous system responsible for this action:",
            "Sympathetic",
            "identify",
            ["Somatic", "Sympathetic", "Central", "Parasympathetic"],
            1,
        ))]
}

fn fallback_question(
    id: &str,
    prompt: &str,
    answer: &str,
    kind: &str,
    options: [&str; 4],
    correct_index: usize,
) -> Question {
    Question {
        id: id.to_string(),
        question: prompt.to_string(),
        answer: answer.to_string(),
        kind: kind.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl SlideSource for FailingSource {
        fn fetch(&self) -> Result<String> {
            Err(Error::Fetch("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "unreachable".to_string()
        }
    }

    const TWO_PAGES_ONE_EMPTY: &str = r#"[
        {"page": 1, "image_id": "slide_1", "questions": []},
        {"page": 2, "image_id": "slide_2", "questions": [
            {"id": "q2_1", "question": "Q?", "answer": "C", "type": "describe",
             "options": ["A", "B", "C", "D"], "correct_index": 2}
        ]},
        {"page": 3, "image_id": "slide_3", "questions": []}
    ]"#;

    #[test]
    fn test_parse_drops_empty_slides() {
        let slides = parse_slides(TWO_PAGES_ONE_EMPTY).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].page, 2);
    }

    #[test]
    fn test_parse_rejects_bad_correct_index() {
        let json = r#"[{"page": 1, "image_id": "s", "questions": [
            {"id": "q1_1", "question": "Q?", "answer": "A", "type": "t",
             "options": ["A", "B", "C", "D"], "correct_index": 9}
        ]}]"#;
        assert!(matches!(
            parse_slides(json),
            Err(Error::InvalidQuestion { page: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let json = r#"[{"page": 1, "questions": [{"id": "q1_1"}]}]"#;
        assert!(matches!(parse_slides(json), Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_from_static_source() {
        let loaded = Loader::new(StaticSource::new(TWO_PAGES_ONE_EMPTY)).load();
        assert_eq!(loaded.origin, Origin::Source);
        assert_eq!(loaded.total_questions(), 1);
    }

    #[test]
    fn test_load_falls_back_on_fetch_error() {
        let loaded = Loader::new(FailingSource).load();
        assert!(loaded.is_fallback());
        assert_eq!(loaded.slides, fallback_slides());
        assert!(loaded.total_questions() >= 1);
    }

    #[test]
    fn test_load_falls_back_on_invalid_json() {
        let loaded = Loader::new(StaticSource::new("<html>not found</html>")).load();
        assert!(loaded.is_fallback());
        assert_eq!(loaded.total_questions(), 2);
    }

    #[test]
    fn test_load_falls_back_when_every_slide_is_empty() {
        let json = r#"[{"page": 1, "image_id": "slide_1", "questions": []}]"#;
        let loader = Loader::new(StaticSource::new(json));
        assert!(matches!(loader.try_load(), Err(Error::NoQuestions)));
        assert!(loader.load().is_fallback());
    }

    #[test]
    fn test_load_falls_back_on_missing_file() {
        let loaded = Loader::new(FileSource::new("/nonexistent/questions.json")).load();
        assert!(loaded.is_fallback());
    }

    #[test]
    fn test_fallback_dataset_is_valid() {
        let slides = fallback_slides();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].questions.len(), 2);
        for q in &slides[0].questions {
            assert!(q.validate().is_ok());
        }
        assert_eq!(slides[0].questions[0].correct_index, 2);
        assert_eq!(slides[0].questions[1].correct_index, 1);
    }
}
