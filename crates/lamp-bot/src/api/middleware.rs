//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Header Slack sets when it redelivers a webhook.
const SLACK_RETRY_HEADER: &str = "x-slack-retry-num";

/// Slack treats webhooks that take longer than this as failed and retries.
const SLACK_DEADLINE: Duration = Duration::from_secs(3);

/// Log each request, flagging Slack redeliveries and slow responses.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let retry = request
        .headers()
        .get(SLACK_RETRY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let start = Instant::now();

    match &retry {
        Some(attempt) => info!(%method, %path, %attempt, "Slack redelivered request"),
        None => debug!(%method, %path, "Request started"),
    }

    let response = next.run(request).await;
    let elapsed = start.elapsed();
    let status = response.status();

    if elapsed > SLACK_DEADLINE {
        warn!(%method, %path, %status, ?elapsed, "Response missed Slack's deadline");
    } else if status.is_success() {
        debug!(%method, %path, %status, ?elapsed, "Request completed");
    } else {
        warn!(%method, %path, %status, ?elapsed, "Request failed");
    }

    response
}
