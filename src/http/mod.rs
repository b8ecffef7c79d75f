//! HTTP protocol layer module
//!
//! Response builders shared by the router and the cafe handler.

pub mod response;

pub use response::{
    build_404_response, build_405_response, build_health_response, build_options_response,
    build_text_response,
};
