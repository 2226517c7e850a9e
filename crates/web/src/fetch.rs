//! Browser fetch of the question document with a deadline.

use js_sys::{Array, Promise};
use quiz_core::{Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, Response, Window};

/// Default deadline for the question document, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: i32 = 10_000;

/// Fetch `url` as text, giving up after `timeout_ms`.
///
/// One timer covers both the request and the body read. Each step is raced
/// against it; when the timer wins the request is aborted and
/// [`Error::Timeout`] is returned.
pub async fn fetch_text(url: &str, timeout_ms: i32) -> Result<String> {
    let window = web_sys::window().ok_or_else(|| Error::Fetch("no window".to_string()))?;

    let controller = AbortController::new().map_err(js_error)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(&controller.signal()));
    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;

    // Resolves with `undefined`, which neither a fetch nor a body read ever does.
    let mut handle = None;
    let timer = Promise::new(&mut |resolve, _reject| {
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms) {
            Ok(h) => handle = Some(h),
            Err(e) => log::error!("Failed to arm fetch timeout: {:?}", e),
        }
    });

    let result = read_body(&window, &request, &timer, url).await;
    match &result {
        Err(Error::Timeout) => controller.abort(),
        _ => {
            if let Some(h) = handle {
                window.clear_timeout_with_handle(h);
            }
        }
    }
    result
}

async fn read_body(window: &Window, request: &Request, timer: &Promise, url: &str) -> Result<String> {
    let value = race(&window.fetch_with_request(request), timer).await?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| Error::Fetch("fetch did not return a Response".to_string()))?;
    if !response.ok() {
        return Err(Error::Fetch(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let text = race(&response.text().map_err(js_error)?, timer).await?;
    text.as_string()
        .ok_or_else(|| Error::Fetch("response body is not text".to_string()))
}

/// Await `work` unless `timer` resolves first.
async fn race(work: &Promise, timer: &Promise) -> Result<JsValue> {
    let value = JsFuture::from(Promise::race(&Array::of2(work, timer)))
        .await
        .map_err(js_error)?;
    if value.is_undefined() {
        return Err(Error::Timeout);
    }
    Ok(value)
}

fn js_error(value: JsValue) -> Error {
    Error::Fetch(format!("{:?}", value))
}
