use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::{header::CONTENT_LENGTH, Method},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Longest request payload echoed into the access log.
const MAX_LOGGED_PAYLOAD: usize = 256;

/// Request bodies above this size, or of unknown size, are passed through
/// untouched and logged without a payload.
const MAX_BUFFERED_BODY: u64 = 1024 * 1024;

pub fn init_logging(debug: bool) {
    let default_directives = if debug {
        "parkspot_api=debug,tower_http=info"
    } else {
        "parkspot_api=info,tower_http=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

pub async fn request_logger(mut request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if !path.starts_with("/api/") {
        return next.run(request).await;
    }

    let payload = extract_compact_payload(&mut request).await;

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();

    let log_line = format!(
        "{} {} {} {:05.2}ms {}",
        method,
        path,
        status,
        duration_ms,
        payload.as_deref().unwrap_or("{}")
    );

    match status {
        200..=399 => info!("{}", log_line),
        400..=499 => warn!("{}", log_line),
        _ => error!("{}", log_line),
    }

    response
}

async fn extract_compact_payload(request: &mut Request<Body>) -> Option<String> {
    if request.method() != Method::POST || !is_bufferable(request) {
        return None;
    }

    let body = std::mem::replace(request.body_mut(), Body::empty());
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            let compact = compact_payload(&bytes);
            *request.body_mut() = Body::from(bytes);
            Some(compact)
        }
        Err(e) => {
            warn!("Failed to read request body for logging: {}", e);
            None
        }
    }
}

/// Whether the declared body size is known and small enough to buffer.
fn is_bufferable(request: &Request<Body>) -> bool {
    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .or_else(|| request.body().size_hint().exact());

    declared.is_some_and(|len| len <= MAX_BUFFERED_BODY)
}

/// Single-line rendering of a JSON body, cut at [`MAX_LOGGED_PAYLOAD`] characters.
fn compact_payload(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let compact = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => value.to_string(),
        Err(_) => text.trim().to_string(),
    };

    match compact.char_indices().nth(MAX_LOGGED_PAYLOAD) {
        Some((cut, _)) => format!("{}...", &compact[..cut]),
        None => compact,
    }
}

pub fn log_panic(info: &std::panic::PanicHookInfo) {
    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    };

    let location = info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    error!("PANIC at {}: {}", location, payload);
}

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic(info);
        default_hook(info);
    }));
}
