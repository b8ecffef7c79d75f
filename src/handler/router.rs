//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, dispatching and access logging.

use crate::config::{AppState, HealthConfig};
use crate::handler::cafe;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::net::SocketAddr;
use std::time::Instant;

/// Path of the cafe lookup endpoint
pub const CAFE_PATH: &str = "/cafe";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    /// Raw query string without the leading `?`
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();

    let mut response = check_http_method(req.method(), state.config.http.enable_cors)
        .unwrap_or_else(|| {
            let ctx = RequestContext {
                path: req.uri().path(),
                query: req.uri().query(),
                is_head: method_is(req.method(), &Method::HEAD),
            };
            route_request(&ctx, state)
        });

    if let Some(server) = &state.server_header {
        response.headers_mut().insert(SERVER, server.clone());
    }

    if state.access_log() {
        log_access(req, &response, peer_addr, started, state);
    }

    response
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
///
/// Method names are compared ignoring ASCII case, so `Get` is served as `GET`.
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    if method_is(method, &Method::GET) || method_is(method, &Method::HEAD) {
        return None;
    }
    if method_is(method, &Method::OPTIONS) {
        return Some(http::build_options_response(enable_cors));
    }

    logger::log_warning(&format!("Method not allowed: {method}"));
    Some(http::build_405_response())
}

fn method_is(method: &Method, expected: &Method) -> bool {
    method.as_str().eq_ignore_ascii_case(expected.as_str())
}

/// Route request based on path
fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    if ctx.path == CAFE_PATH {
        return cafe::serve_cafes(ctx, &state.directory);
    }

    if is_health_path(&state.config.routes.health, ctx.path) {
        return http::build_health_response(ctx.is_head);
    }

    http::build_404_response(ctx.is_head)
}

fn is_health_path(health: &HealthConfig, path: &str) -> bool {
    health.enabled && (path == health.liveness_path || path == health.readiness_path)
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = logger::version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}
