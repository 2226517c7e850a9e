//! Browser tests for the JS-facing handle. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use quiz_web::QuizHandle;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn snapshot_crosses_the_boundary() {
    let handle = QuizHandle::from_json("not json");
    assert!(handle.used_fallback());

    let snapshot = handle.snapshot().unwrap();
    let state = js_sys::Reflect::get(&snapshot, &"state".into()).unwrap();
    assert_eq!(state.as_string().as_deref(), Some("not_started"));
}

#[wasm_bindgen_test]
fn advance_reports_finish() {
    let mut handle = QuizHandle::from_json("not json");
    handle.select_current(0, 2).unwrap();
    let result = handle.advance().unwrap();
    let kind = js_sys::Reflect::get(&result, &"kind".into()).unwrap();
    assert_eq!(kind.as_string().as_deref(), Some("finished"));
}
