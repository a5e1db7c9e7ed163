//! `fetch`-backed [`ContactService`] implementation.

use platform_host::{
    normalize_health_response, normalize_submit_response, ContactService, ContactServiceFuture,
    HealthCheck, SubmitOutcome,
};
use portfolio_contract::ContactSubmission;

/// Backend used when `PORTFOLIO_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Returns the backend base URL baked in at build time.
pub fn api_base_url() -> &'static str {
    match option_env!("PORTFOLIO_API_URL") {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_API_BASE_URL,
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    pub(super) async fn fetch_text(
        method: &str,
        url: &str,
        body: Option<&str>,
    ) -> Result<(u16, String), String> {
        let init = RequestInit::new();
        init.set_method(method);
        init.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &init).map_err(js_error_to_string)?;
        let headers = request.headers();
        headers
            .set("Accept", "application/json")
            .map_err(js_error_to_string)?;
        if body.is_some() {
            headers
                .set("Content-Type", "application/json")
                .map_err(js_error_to_string)?;
        }

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error_to_string)?
            .dyn_into()
            .map_err(js_error_to_string)?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(js_error_to_string)?)
            .await
            .map_err(js_error_to_string)?
            .as_string()
            .unwrap_or_default();
        Ok((status, text))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub(super) async fn fetch_text(
        _method: &str,
        url: &str,
        _body: Option<&str>,
    ) -> Result<(u16, String), String> {
        Err(format!("fetch is unavailable outside the browser ({url})"))
    }
}

/// Contact backend client using the browser `fetch` API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebContactService {
    base_url: String,
}

impl Default for WebContactService {
    fn default() -> Self {
        Self::new(api_base_url())
    }
}

impl WebContactService {
    /// Creates a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the absolute URL for an API `path`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl ContactService for WebContactService {
    fn check_health<'a>(&'a self) -> ContactServiceFuture<'a, HealthCheck> {
        Box::pin(async move {
            match imp::fetch_text("GET", &self.endpoint("/health"), None).await {
                Ok((status, body)) => normalize_health_response(status, &body),
                Err(_) => HealthCheck::offline(),
            }
        })
    }

    fn submit_contact<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> ContactServiceFuture<'a, SubmitOutcome> {
        Box::pin(async move {
            let Ok(body) = serde_json::to_string(submission) else {
                return SubmitOutcome::network_error();
            };
            match imp::fetch_text("POST", &self.endpoint("/api/contact"), Some(&body)).await {
                Ok((status, body)) => normalize_submit_response(status, &body),
                Err(_) => SubmitOutcome::network_error(),
            }
        })
    }
}
