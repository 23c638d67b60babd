//! Middleware stack for the API server
//!
//! Request ids, tracing spans, timeouts, CORS and global rate limiting.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tweet_common::{AppError, CorsConfig, RateLimitConfig};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests taking longer than this get 503
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the middleware stack
///
/// Incoming order: rate limit, request id, trace, timeout, CORS, handler.
///
/// # Errors
/// Returns `AppError::Config` if the rate limiter settings are invalid
/// (for example a zero rate or burst)
pub fn apply_middleware(
    router: Router<AppState>,
    rate_limit: &RateLimitConfig,
    cors: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit.requests_per_second.into())
            .burst_size(rate_limit.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .ok_or_else(|| {
                AppError::Config(format!(
                    "invalid rate limit: {} req/s, burst {}",
                    rate_limit.requests_per_second, rate_limit.burst
                ))
            })?,
    );

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Ok(router
        .layer(cors_layer(cors, is_production))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(GovernorLayer {
            config: governor_conf,
        }))
}

/// CORS from configuration
///
/// Without configured origins, development allows any origin and
/// production blocks cross-origin browsers.
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!("CORS: no allowed origins configured in production");
            return base.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()));
        }
        tracing::warn!("CORS: allowing any origin (development mode)");
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS: allowing {} configured origins", origins.len());
    base.allow_origin(AllowOrigin::list(origins))
}
