use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

/// Why a source document could not be turned into a value tree.
///
/// Both variants describe a non-fatal error state of the whole view; they
/// never escape as panics and there is no partial result to salvage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or all whitespace.
    #[error("Empty JSON string")]
    EmptyInput,

    /// The input was not valid JSON; carries the parser diagnostic.
    #[error("JSON Parse Error: {message}")]
    Syntax { message: String },
}

/// Parse raw JSON text into a value tree. The whole document is parsed at
/// once; object key order is preserved as it appears in the input.
pub fn parse_document(text: &str) -> Result<Value, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    match serde_json::from_str(text) {
        Ok(value) => {
            debug!("parsed document of {} bytes", text.len());
            Ok(value)
        }
        Err(e) => {
            warn!("document failed to parse: {e}");
            Err(ParseError::Syntax {
                message: e.to_string(),
            })
        }
    }
}
