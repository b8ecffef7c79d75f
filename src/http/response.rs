//! HTTP response building module
//!
//! Provides builders for the responses the server sends, decoupled from
//! the cafe lookup itself.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build plain text response; HEAD keeps the headers but drops the body
pub fn build_text_response(
    status: StatusCode,
    content: String,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_PLAIN)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found".to_string(), is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", TEXT_PLAIN)
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOW);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOW)
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health probe response
pub fn build_health_response(is_head: bool) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, "ok".to_string(), is_head)
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_text_response_headers() {
        let resp = build_text_response(StatusCode::OK, "Мир кофе".to_string(), false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some(TEXT_PLAIN));
        // Byte length, not char count
        assert_eq!(header(&resp, "content-length"), Some("15"));
    }

    #[test]
    fn test_head_keeps_length() {
        let resp = build_text_response(StatusCode::BAD_REQUEST, "unknown city".to_string(), true);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(header(&resp, "content-length"), Some("12"));
    }

    #[test]
    fn test_405_allow() {
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(header(&resp, "allow"), Some(ALLOW));
    }

    #[test]
    fn test_options_cors() {
        let plain = build_options_response(false);
        assert_eq!(plain.status(), StatusCode::NO_CONTENT);
        assert!(header(&plain, "access-control-allow-origin").is_none());

        let cors = build_options_response(true);
        assert_eq!(header(&cors, "access-control-allow-origin"), Some("*"));
    }
}
