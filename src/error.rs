//! Unified error type for collaborator-level failures.
//!
//! The core transpiler never fails (anomalies degrade to warnings and
//! dropped lines); these variants cover the surrounding work of reading and
//! decoding a collection document.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HcgenError {
    #[error("failed to read {path}")]
    #[diagnostic(code(hcgen::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("collection is not valid JSON")]
    #[diagnostic(code(hcgen::json))]
    Json(#[from] serde_json::Error),

    #[error("malformed collection: {message}")]
    #[diagnostic(
        code(hcgen::collection),
        help("the document must be a Postman v2.x export")
    )]
    Collection { message: String },
}
