//! # Invoice API Errors
//!
//! Every failure becomes one operator-readable message. For HTTP error
//! responses the message is pulled out of the JSON body.
//!
//! ## Message Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. {"error": "Order has no items"}          → "Order has no items"     │
//! │  2. {"detail": ["Not", "found"]}             → "Not found"              │
//! │  3. {"detail": "Not found."}                 → "Not found."             │
//! │  4. {"customer": ["required"], "x": "bad"}   → "customer: required; x: bad"
//! │  5. anything else / unparseable              → "API error: 400"         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty strings and empty lists never win a step; the next one is tried.

use serde_json::Value;
use thiserror::Error;

/// Errors from the invoicing backend client.
#[derive(Debug, Error)]
pub enum InvoiceApiError {
    /// Non-2xx response from a JSON endpoint.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Non-2xx response from the PDF endpoint.
    #[error("Failed to fetch PDF")]
    PdfFetch { status: u16 },

    /// The backend could not be reached or the connection broke.
    #[error("Could not reach invoice backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from invoice backend: {0}")]
    Decode(String),
}

impl InvoiceApiError {
    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            InvoiceApiError::Api { status, .. } | InvoiceApiError::PdfFetch { status } => {
                Some(*status)
            }
            InvoiceApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            InvoiceApiError::Decode(_) => None,
        }
    }
}

/// Result type for invoice API calls.
pub type InvoiceResult<T> = Result<T, InvoiceApiError>;

/// Builds the operator message for an error response.
///
/// Arrays are read as objects keyed by index, so `["a", "b"]` gives
/// `0: a; 1: b`. Any other non-object body is treated as `{}`.
pub fn extract_error_message(status: u16, body: &[u8]) -> String {
    let fields: Vec<(String, Value)> = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        Ok(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        _ => Vec::new(),
    };
    let get = |name: &str| fields.iter().find(|(key, _)| key == name).map(|(_, value)| value);

    if let Some(Value::String(error)) = get("error") {
        if !error.is_empty() {
            return error.clone();
        }
    }

    match get("detail") {
        Some(Value::Array(parts)) => {
            let joined = join_values(parts, " ");
            if !joined.is_empty() {
                return joined;
            }
        }
        Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
        _ => {}
    }

    let field_errors = fields
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some(format!("{key}: {text}")),
            Value::Array(parts) => Some(format!("{key}: {}", join_values(parts, ", "))),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("; ");

    if !field_errors.is_empty() {
        return field_errors;
    }

    format!("API error: {status}")
}

fn join_values(values: &[Value], separator: &str) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(status: u16, body: Value) -> String {
        extract_error_message(status, body.to_string().as_bytes())
    }

    #[test]
    fn test_error_string_wins() {
        let body = json!({ "error": "Order 9 not found", "detail": "ignored" });
        assert_eq!(extract(400, body), "Order 9 not found");
    }

    #[test]
    fn test_detail_list_joined_with_spaces() {
        assert_eq!(extract(400, json!({ "detail": ["Not", "allowed."] })), "Not allowed.");
    }

    #[test]
    fn test_detail_string() {
        assert_eq!(extract(404, json!({ "detail": "Not found." })), "Not found.");
    }

    #[test]
    fn test_empty_error_falls_through() {
        // "error" itself is a string entry in the field list
        let body = json!({ "error": "", "detail": [] });
        assert_eq!(extract(400, body), "error: ; detail: ");
    }

    #[test]
    fn test_field_errors_in_body_order() {
        let body = json!({
            "customer": { "name": ["This field is required."] },
            "items": ["Ensure this field has at least 1 elements."],
            "state_code": "Too long",
            "count": 3
        });
        assert_eq!(
            extract(400, body),
            "items: Ensure this field has at least 1 elements.; state_code: Too long"
        );
    }

    #[test]
    fn test_list_values_joined_with_commas() {
        let body = json!({ "quantity": ["Must be positive.", "Must be an integer."] });
        assert_eq!(extract(400, body), "quantity: Must be positive., Must be an integer.");
    }

    #[test]
    fn test_fallback_to_status() {
        assert_eq!(extract_error_message(500, b"<html>oops</html>"), "API error: 500");
        assert_eq!(extract_error_message(502, b""), "API error: 502");
        assert_eq!(extract(400, json!("just a string")), "API error: 400");
        assert_eq!(extract(400, json!([1, null])), "API error: 400");
        assert_eq!(extract(400, json!({ "code": 7 })), "API error: 400");
    }

    #[test]
    fn test_array_body_reads_as_indexed_fields() {
        assert_eq!(extract(400, json!(["a", "b"])), "0: a; 1: b");
        assert_eq!(extract(400, json!([["x", "y"], 3, "z"])), "0: x, y; 2: z");
    }

    #[test]
    fn test_display_is_the_message() {
        let err = InvoiceApiError::Api {
            status: 400,
            message: "Order has no items".to_string(),
        };
        assert_eq!(err.to_string(), "Order has no items");
        assert_eq!(err.status(), Some(400));
        assert_eq!(InvoiceApiError::PdfFetch { status: 404 }.to_string(), "Failed to fetch PDF");
    }
}
