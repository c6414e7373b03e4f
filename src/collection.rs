//! Postman collection document model.
//!
//! A v2.x collection export is a tree of folders and items; anything in that
//! tree carrying a `"request"` field is an endpoint we can render. Only the
//! fields the renderer needs are modeled; the rest of the document passes
//! through the recursive walk untouched.

use serde::Deserialize;
use serde_json::Value;

use crate::error::HcgenError;

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub header: Vec<Header>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default)]
    pub url: Option<Url>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Body {
    pub mode: String,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub options: Option<BodyOptions>,
}

impl Body {
    /// True when the raw body declares `json` as its language, which makes
    /// the renderer add a Content-Type line.
    pub fn is_json(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.raw.as_ref())
            .and_then(|r| r.language.as_deref())
            == Some("json")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodyOptions {
    #[serde(default)]
    pub raw: Option<RawOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOptions {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Url {
    pub raw: String,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: Vec<Query>,
    #[serde(default)]
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Event {
    listen: String,
    script: Script,
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    exec: Vec<String>,
}

/// A request node located in the collection tree, paired with its test
/// script when one exists.
#[derive(Debug)]
pub struct Endpoint {
    pub name: String,
    pub request: Request,
    /// The `exec` lines of the last `"test"` event, rejoined with newlines.
    pub test_script: Option<String>,
}

/// Recursively locates every node exposing a `"request"` field. A node that
/// carries a request is a leaf for the walk; folders and arrays are
/// descended into.
pub fn find_endpoints(document: &Value) -> Result<Vec<Endpoint>, HcgenError> {
    let mut endpoints = Vec::new();
    collect_requests(document, &mut endpoints)?;
    Ok(endpoints)
}

fn collect_requests(value: &Value, out: &mut Vec<Endpoint>) -> Result<(), HcgenError> {
    match value {
        Value::Object(map) => {
            if let Some(request) = map.get("request") {
                let name = map
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unnamed request")
                    .to_string();
                let request: Request =
                    serde_json::from_value(request.clone()).map_err(|e| {
                        HcgenError::Collection {
                            message: format!("request \"{name}\": {e}"),
                        }
                    })?;
                let test_script = map
                    .get("event")
                    .and_then(Value::as_array)
                    .and_then(|events| last_test_script(events));
                out.push(Endpoint {
                    name,
                    request,
                    test_script,
                });
            } else {
                for inner in map.values() {
                    collect_requests(inner, out)?;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_requests(item, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Scans the event list from the end; the last test-labeled entry wins.
fn last_test_script(events: &[Value]) -> Option<String> {
    events.iter().rev().find_map(|entry| {
        let event: Event = serde_json::from_value(entry.clone()).ok()?;
        (event.listen == "test").then(|| event.script.exec.join("\n"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_requests_nested_in_folders() {
        let doc = json!({
            "info": { "name": "clinic" },
            "item": [
                { "name": "folder", "item": [
                    { "name": "get patients", "request": { "method": "GET" } }
                ]},
                { "name": "ping", "request": { "method": "HEAD" } }
            ]
        });
        let endpoints = find_endpoints(&doc).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].name, "get patients");
        assert_eq!(endpoints[1].request.method, "HEAD");
    }

    #[test]
    fn last_test_event_wins() {
        let doc = json!({
            "name": "patients",
            "request": { "method": "GET" },
            "event": [
                { "listen": "test", "script": { "exec": ["// old"] } },
                { "listen": "prerequest", "script": { "exec": ["setup();"] } },
                { "listen": "test", "script": { "exec": ["// new"] } }
            ]
        });
        let endpoints = find_endpoints(&doc).unwrap();
        assert_eq!(endpoints[0].test_script.as_deref(), Some("// new"));
    }

    #[test]
    fn endpoint_without_test_event_has_no_script() {
        let doc = json!({
            "name": "plain",
            "request": { "method": "DELETE" },
            "event": [
                { "listen": "prerequest", "script": { "exec": ["x();"] } }
            ]
        });
        let endpoints = find_endpoints(&doc).unwrap();
        assert!(endpoints[0].test_script.is_none());
    }

    #[test]
    fn malformed_request_is_a_collection_error() {
        let doc = json!({ "name": "broken", "request": { "headers": [] } });
        let err = find_endpoints(&doc).unwrap_err();
        assert!(matches!(err, HcgenError::Collection { .. }));
    }
}
