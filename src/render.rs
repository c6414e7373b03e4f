//! Assembles the final `.http` document.
//!
//! One request block per endpoint: a `###` separator, the request line,
//! headers, the raw body, and the converted test script wrapped in a
//! `> {% ... %}` response handler. An optional fixed authorization request
//! is prepended when asked for.

use crate::collection::Endpoint;
use crate::transpile::convert_script;

/// The fixed login request prepended with `--auth`. It stores the returned
/// token as a global the later requests can reference.
pub const AUTH_PREAMBLE: &str = "### Authorization\n\
POST {{baseUrl}}/auth/login\n\
Content-Type: application/json\n\
\n\
{\n  \"username\": \"{{username}}\",\n  \"password\": \"{{password}}\"\n}\n\
\n\
> {%\n    client.global.set(\"token\", response.body.token);\n%}\n";

#[derive(Debug, Default)]
pub struct RenderOptions {
    pub auth_preamble: bool,
}

#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    /// Conversion warnings from all endpoint scripts, prefixed with the
    /// endpoint name.
    pub warnings: Vec<String>,
}

/// Renders every endpoint into one document, blocks separated by blank
/// lines.
pub fn render_collection(endpoints: &[Endpoint], options: &RenderOptions) -> Rendered {
    let mut blocks = Vec::new();
    let mut warnings = Vec::new();

    if options.auth_preamble {
        blocks.push(AUTH_PREAMBLE.to_string());
    }
    for endpoint in endpoints {
        blocks.push(render_endpoint(endpoint, &mut warnings));
    }

    Rendered {
        text: blocks.join("\n"),
        warnings,
    }
}

fn render_endpoint(endpoint: &Endpoint, warnings: &mut Vec<String>) -> String {
    let request = &endpoint.request;
    let mut block = String::new();

    block.push_str(&format!("### {}\n", endpoint.name));
    match &request.url {
        Some(url) => block.push_str(&format!("{} {}\n", request.method, url.raw)),
        None => block.push_str(&format!("{}\n", request.method)),
    }
    for header in &request.header {
        block.push_str(&format!("{}: {}\n", header.key, header.value));
    }

    if let Some(body) = &request.body {
        if body.is_json() && !has_content_type(endpoint) {
            block.push_str("Content-Type: application/json\n");
        }
        if let Some(raw) = body.raw.as_deref().filter(|r| !r.is_empty()) {
            block.push('\n');
            block.push_str(raw);
            if !raw.ends_with('\n') {
                block.push('\n');
            }
        }
    }

    if let Some(source) = &endpoint.test_script {
        let converted = convert_script(source);
        warnings.extend(
            converted
                .warnings
                .into_iter()
                .map(|w| format!("{}: {w}", endpoint.name)),
        );
        if !converted.script.is_empty() {
            block.push_str("\n> {%\n");
            block.push_str(&converted.script);
            block.push_str("%}\n");
        }
    }

    block
}

fn has_content_type(endpoint: &Endpoint) -> bool {
    endpoint
        .request
        .header
        .iter()
        .any(|h| h.key.eq_ignore_ascii_case("content-type"))
}
