//! Transports that actually move a request over the wire.
//!
//! The browser transport uses `window.fetch`; tests use [`RecordingTransport`],
//! which replays canned responses and keeps every request it was given.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Sends a request and returns the raw response.
///
/// Browser futures are not `Send`, so neither is this trait.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode};

    /// `window.fetch` transport.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserTransport;

    #[async_trait(?Send)]
    impl Transport for BrowserTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            let window = web_sys::window()
                .ok_or_else(|| FetchError::RequestError("no window".into()))?;

            let headers = Headers::new()?;
            for (key, value) in &request.headers {
                headers.set(key, value)?;
            }

            let opts = RequestInit::new();
            opts.set_method(request.method.as_str());
            opts.set_mode(RequestMode::Cors);
            opts.set_headers(&headers);
            if let Some(body) = request.body_text() {
                opts.set_body(&JsValue::from_str(&body));
            }

            let js_request = Request::new_with_str_and_init(&request.url, &opts)
                .map_err(|_| FetchError::InvalidUrl(request.url.clone()))?;

            let resp_value = JsFuture::from(window.fetch_with_request(&js_request)).await?;
            let resp: web_sys::Response = resp_value.dyn_into()?;

            let text = JsFuture::from(resp.text()?)
                .await?
                .as_string()
                .unwrap_or_default();

            Ok(Response::new(resp.status(), text.into_bytes()))
        }
    }
}

/// Replays queued responses in order and records every request.
///
/// When the queue is empty it answers `200 []`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: RefCell<VecDeque<Result<Response, FetchError>>>,
    requests: RefCell<Vec<RequestBuilder>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(Response::new(status, body.as_bytes().to_vec())));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(self, error: FetchError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(200, b"[]".to_vec())))
    }
}
