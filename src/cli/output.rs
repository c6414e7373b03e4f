//! Handles all user-facing output for the CLI.
//!
//! Library code never prints; conversion warnings and listings are rendered
//! here so every command reports them the same way.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::collection::Endpoint;

/// Prints conversion warnings to stderr, one per line.
pub fn print_warnings(warnings: &[String]) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    for warning in warnings {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(stderr, "warning");
        let _ = stderr.reset();
        let _ = writeln!(stderr, ": {warning}");
    }
}

/// Prints one line per endpoint: method, URL, name.
pub fn print_endpoints(endpoints: &[Endpoint]) {
    for endpoint in endpoints {
        let url = endpoint
            .request
            .url
            .as_ref()
            .map(|u| u.raw.as_str())
            .unwrap_or("-");
        println!("{:7} {}  {}", endpoint.request.method, url, endpoint.name);
    }
}
