use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use web_sys::{AbortController, RequestCredentials};

use super::error::ApiError;
use super::payload::Payload;
use super::request::{ApiRequest, HttpMethod, WireBody};
use super::transport::Transport;
use crate::shared::api_utils::{join_url, AppConfig};

/// Browser fetch client bound to the API base URL.
///
/// Every request is sent with credentials, races a timeout and can be aborted
/// through the request's [`super::CancelToken`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    timeout_ms: u32,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base.clone(), config.timeout_ms)
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        let url = self.url(&request.path);

        if request.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(ApiError::cancelled(&url));
        }

        let request_id = uuid::Uuid::new_v4();
        log::debug!("[{}] {} {}", request_id, request.method.as_str(), url);

        let controller = AbortController::new().ok();
        if let (Some(token), Some(controller)) = (&request.cancel, &controller) {
            token.register(controller);
        }
        let signal = controller.as_ref().map(|c| c.signal());

        let (headers, body) = request.wire_parts();
        let mut builder = Self::builder(request.method, &url)
            .credentials(RequestCredentials::Include)
            .abort_signal(signal.as_ref());
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        let built = match body {
            None => builder.build(),
            Some(WireBody::Text(text)) => builder.body(text),
            Some(WireBody::Form(form)) => builder.body(form),
        }
        .map_err(|e| ApiError::network(&url, e))?;

        let sending = Box::pin(built.send());
        let timer = Box::pin(TimeoutFuture::new(self.timeout_ms));

        let response = match select(sending, timer).await {
            Either::Left((result, _)) => result.map_err(|e| {
                if request.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                    ApiError::cancelled(&url)
                } else {
                    ApiError::network(&url, e)
                }
            })?,
            Either::Right(_) => {
                if let Some(controller) = &controller {
                    controller.abort();
                }
                log::warn!(
                    "[{}] {} {} timed out after {} ms",
                    request_id,
                    request.method.as_str(),
                    url,
                    self.timeout_ms
                );
                return Err(ApiError::timeout(&url, self.timeout_ms));
            }
        };

        let status = response.status();
        let status_text = response.status_text();
        let text = response.text().await.unwrap_or_default();
        let payload = Payload::from_body(status, text);

        if (200..300).contains(&status) {
            Ok(payload)
        } else {
            log::warn!("[{}] {} {} -> {}", request_id, request.method.as_str(), url, status);
            let raw = match payload {
                Payload::Empty => None,
                other => Some(other.into_value()),
            };
            Err(ApiError::http(status, &status_text, raw, &url))
        }
    }
}
