//! Logger module
//!
//! Provides logging utilities for the cafe server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{version_label, AccessLogEntry};
pub use writer::LogLevel;

use crate::cafe::CafeDirectory;
use crate::config::Config;
use std::io;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

// Before init() everything goes to stdout/stderr unfiltered

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(message),
        None => eprintln!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, directory: &CafeDirectory) {
    write_info("======================================");
    write_info("Cafe server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    match config.server.workers {
        Some(workers) => write_info(&format!("Worker threads: {workers}")),
        None => write_info("Worker threads: default (CPU cores)"),
    }
    if let Some(max_conn) = config.performance.max_connections {
        write_info(&format!("Max connections: {max_conn}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    let source = if config.cafes.is_some() {
        "config"
    } else {
        "built-in"
    };
    write_info(&format!(
        "Cafe directory ({source}): {} cafes in [{}]",
        directory.len(),
        directory.cities().join(", ")
    ));
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_warning(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    write_info(&format!("\n[SIGNAL] {signal} received, shutting down"));
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info("[SHUTDOWN] All connections closed");
    } else {
        log_warning(&format!(
            "[SHUTDOWN] Grace period elapsed with {remaining} connection(s) still open"
        ));
    }
}
