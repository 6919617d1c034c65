use bridge_core::{
    error::Result,
    models::{Connection, ErrorDetail},
    AuthResolver,
};
use reqwest::{header, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

/// A 2xx response whose body parsed as JSON
pub(crate) struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Resolve and check a connection; both fields must be present before any request
pub(crate) async fn resolve_connection(auth: &dyn AuthResolver, caller: &str) -> Result<Connection> {
    let connection = auth.resolve(caller).await?;
    connection.ensure_complete()?;
    Ok(connection)
}

/// Attach bearer auth and JSON headers
pub(crate) fn authorized(request: RequestBuilder, connection: &Connection) -> RequestBuilder {
    request
        .bearer_auth(&connection.access_token)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
}

/// Send a request and read a JSON body, turning every failure into an [`ErrorDetail`]
pub(crate) async fn send_json(
    request: RequestBuilder,
    url: &Url,
) -> std::result::Result<JsonResponse, ErrorDetail> {
    let response = request
        .send()
        .await
        .map_err(|e| ErrorDetail::new(e.to_string(), url.as_str()))?;

    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        ErrorDetail::new(format!("Failed to read response body: {e}"), url.as_str())
            .with_status(status.as_u16(), status_text(status))
    })?;

    if !status.is_success() {
        return Err(ErrorDetail::new(
            format!("Request failed with status code {}", status.as_u16()),
            url.as_str(),
        )
        .with_status(status.as_u16(), status_text(status))
        .with_details(body_details(&bytes)));
    }

    if is_blank(&bytes) {
        return Ok(JsonResponse {
            status,
            body: Value::Null,
        });
    }

    let body = serde_json::from_slice(&bytes).map_err(|e| {
        ErrorDetail::new(format!("Failed to parse response body: {e}"), url.as_str())
            .with_status(status.as_u16(), status_text(status))
    })?;

    Ok(JsonResponse { status, body })
}

/// Shape errors on a 2xx body, reported against the status that carried it
pub(crate) fn shape_failure(message: String, status: StatusCode, url: &Url) -> ErrorDetail {
    ErrorDetail::new(message, url.as_str()).with_status(status.as_u16(), status_text(status))
}

fn status_text(status: StatusCode) -> Option<String> {
    status.canonical_reason().map(str::to_string)
}

/// JSON bodies are kept as-is, other non-empty bodies as a string
fn body_details(bytes: &[u8]) -> Option<Value> {
    if is_blank(bytes) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
