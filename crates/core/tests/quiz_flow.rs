//! End-to-end quiz runs over loaded documents.

use quiz_core::{Advance, AnswerOutcome, Loader, QuizState, Session, StaticSource};

const TWO_SLIDES: &str = r#"[
    {"page": 1, "image_id": "slide_1", "questions": [
        {"id": "q1_1", "question": "First?", "answer": "Three", "type": "identify",
         "options": ["One", "Two", "Three", "Four"], "correct_index": 2}
    ]},
    {"page": 2, "image_id": "slide_2", "questions": []},
    {"page": 3, "image_id": "slide_3", "questions": [
        {"id": "q3_1", "question": "Second?", "answer": "One", "type": "identify",
         "options": ["One", "Two", "Three", "Four"], "correct_index": 0}
    ]}
]"#;

fn load(json: &str) -> Session {
    let loaded = Loader::new(StaticSource::new(json)).load();
    assert!(!loaded.is_fallback());
    Session::new(loaded.slides)
}

#[test]
fn half_right_run_scores_fifty_percent() {
    let mut session = load(TWO_SLIDES);
    assert_eq!(session.slides().len(), 2);
    assert_eq!(session.total_questions(), 2);

    assert_eq!(
        session.select_current(0, 2),
        AnswerOutcome::Recorded { correct: true }
    );
    assert_eq!(session.advance(), Advance::Moved { index: 1 });
    assert_eq!(
        session.select_current(0, 1),
        AnswerOutcome::Recorded { correct: false }
    );

    let Advance::Finished { summary } = session.advance() else {
        panic!("expected completion");
    };
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.total_questions, 2);
    assert_eq!(summary.accuracy, 50);
    assert_eq!(session.score(), summary);
    assert_eq!(session.state(), QuizState::Completed);
}

#[test]
fn repeated_finish_keeps_signalling_completion() {
    let mut session = load(TWO_SLIDES);
    session.advance();
    for _ in 0..3 {
        assert!(matches!(session.advance(), Advance::Finished { .. }));
        assert_eq!(session.current_index(), 1);
    }
}

#[test]
fn restart_after_completion_starts_over() {
    let mut session = load(TWO_SLIDES);
    session.select_current(0, 2);
    session.advance();
    session.select_current(0, 0);
    session.advance();
    assert_eq!(session.score().correct, 2);
    assert_eq!(session.score().accuracy, 100);

    session.restart();
    assert_eq!(session.score().correct, 0);
    assert_eq!(session.score().answered, 0);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.snapshot().results, None);
}

#[test]
fn unreachable_source_still_yields_a_playable_quiz() {
    let loaded = Loader::new(quiz_core::FileSource::new("does/not/exist.json")).load();
    assert!(loaded.is_fallback());

    let mut session = Session::new(loaded.slides);
    assert!(session.total_questions() >= 1);
    assert!(session.select_current(0, 2).is_correct());
    assert!(session.select_current(1, 1).is_correct());
    let Advance::Finished { summary } = session.advance() else {
        panic!("expected completion");
    };
    assert_eq!(summary.accuracy, 100);
}
