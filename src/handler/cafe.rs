//! `/cafe` endpoint
//!
//! Maps the lookup outcome onto a plain text response: names with 200,
//! the validation message with 400.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::cafe::{self, CafeDirectory};
use crate::handler::router::RequestContext;
use crate::http;

pub fn serve_cafes(ctx: &RequestContext<'_>, directory: &CafeDirectory) -> Response<Full<Bytes>> {
    match cafe::lookup(directory, ctx.query) {
        Ok(names) => http::build_text_response(StatusCode::OK, names, ctx.is_head),
        Err(e) => http::build_text_response(StatusCode::BAD_REQUEST, e.to_string(), ctx.is_head),
    }
}
