use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use color_eyre::eyre::Result;
use futures::TryFutureExt;
use tracing::{info, instrument};

/// What the image-analysis service answered
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, content_type);
        }
        (self.status, headers, self.body).into_response()
    }
}

pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Sends one request through to the analysis service and relays status,
/// content type and body.
#[instrument(skip(client, content_type, body), fields(bytes = body.len()))]
pub async fn forward(
    client: &reqwest::Client,
    method: Method,
    url: String,
    content_type: Option<HeaderValue>,
    body: Bytes,
) -> Result<UpstreamResponse> {
    let mut request = client.request(method, &url);
    if let Some(content_type) = content_type {
        request = request.header(CONTENT_TYPE, content_type);
    }
    if !body.is_empty() {
        request = request.body(body);
    }
    let upstream = request
        .send()
        .and_then(|resp| async move {
            let status = resp.status();
            let content_type = resp.headers().get(CONTENT_TYPE).cloned();
            let body = resp.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse {
                status,
                content_type,
                body,
            })
        })
        .await?;
    info!(status = %upstream.status, "analysis service answered");
    Ok(upstream)
}
