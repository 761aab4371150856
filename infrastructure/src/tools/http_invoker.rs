//! HTTP tool invoker: calls a tool adapter endpoint for one file
//!
//! Every tool adapter answers `GET <endpoint>?path=<file id>` with a JSON
//! body:
//!
//! ```json
//! {
//!   "toolVersion": "6.7.0",
//!   "toolOutput": "...",
//!   "outputFormat": "xml",
//!   "features": { "format:puid": { "value": "fmt/18", "label": "PDF 1.4" } },
//!   "score": 0.9,
//!   "error": null
//! }
//! ```

use async_trait::async_trait;
use borg_application::{ToolInvoker, ToolRequest};
use borg_domain::{Features, OutputFormat, ToolError, ToolResponse, util::truncate_diagnostic};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Maximum size of a diagnostic dump of a failed response (64 KB)
const MAX_DIAGNOSTIC_OUTPUT: usize = 64 * 1024;

/// Body of a successful tool response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireToolResponse {
    #[serde(default)]
    tool_version: String,
    #[serde(default)]
    tool_output: String,
    #[serde(default)]
    output_format: String,
    /// Adapters send `null` alongside an error
    #[serde(default)]
    features: Option<Features>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

impl WireToolResponse {
    fn into_response(self) -> ToolResponse {
        let error = self
            .error
            .filter(|e| !e.trim().is_empty())
            .map(ToolError::tool_reported);
        ToolResponse {
            tool_version: self.tool_version,
            tool_output: self.tool_output,
            output_format: OutputFormat::from_tag(&self.output_format),
            features: self.features.unwrap_or_default(),
            score: self.score,
            error,
            response_time_ms: 0,
        }
    }
}

/// reqwest-based [`ToolInvoker`]
pub struct HttpToolInvoker {
    client: Client,
}

impl Default for HttpToolInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpToolInvoker {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build `<endpoint>?path=<file id>`
    fn request_url(request: &ToolRequest) -> Result<Url, ToolError> {
        Url::parse_with_params(&request.endpoint, &[("path", request.file_id.as_str())]).map_err(
            |_| ToolError::request_failed(format!("error creating request: {}", request.endpoint)),
        )
    }

    async fn call(&self, request: &ToolRequest) -> ToolResponse {
        let url = match Self::request_url(request) {
            Ok(url) => url,
            Err(e) => return ToolResponse::failure(e),
        };
        debug!("Calling tool {}: {}", request.tool_id, url);

        let response = match self
            .client
            .get(url.clone())
            .timeout(request.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return ToolResponse::failure(transport_error(&e, &url, request.timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let dump = match diagnostic_dump(response).await {
                Ok(dump) => dump,
                Err(e) => return ToolResponse::failure(transport_error(&e, &url, request.timeout)),
            };
            return ToolResponse::failure(ToolError::http_status(status.as_u16()))
                .with_output(dump, OutputFormat::Text);
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return ToolResponse::failure(transport_error(&e, &url, request.timeout)),
        };
        match serde_json::from_slice::<WireToolResponse>(&body) {
            Ok(wire) => wire.into_response(),
            Err(e) => {
                debug!("Tool {} sent an undecodable body: {}", request.tool_id, e);
                ToolResponse::failure(ToolError::invalid_response())
            }
        }
    }
}

#[async_trait]
impl ToolInvoker for HttpToolInvoker {
    async fn invoke(&self, request: &ToolRequest) -> ToolResponse {
        let start = Instant::now();
        self.call(request).await.with_response_time(start.elapsed())
    }
}

fn transport_error(error: &reqwest::Error, url: &Url, timeout: Duration) -> ToolError {
    if error.is_timeout() {
        ToolError::timeout(timeout)
    } else {
        ToolError::request_failed(format!("error requesting: {}", url))
    }
}

/// Status line, headers and body of a failed response as plain text
async fn diagnostic_dump(response: Response) -> Result<String, reqwest::Error> {
    let mut dump = format!("{:?} {}\n", response.version(), response.status());
    for (name, value) in response.headers() {
        dump.push_str(&format!(
            "{}: {}\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    dump.push('\n');
    let body = response.bytes().await?;
    dump.push_str(&String::from_utf8_lossy(&body));
    Ok(truncate_diagnostic(&dump, MAX_DIAGNOSTIC_OUTPUT))
}
