//! Request and response bodies of the invoicing API.

use dispatch_core::{Customer, OrderItem};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer: Customer,
    pub items: Vec<OrderItem>,
}

/// Response of `POST /api/orders/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: i64,
}

/// Invoice metadata returned by both generate-invoice verbs.
///
/// Unknown fields such as `message` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    pub invoice_no: String,
    pub invoice_date: String,
    pub order_id: i64,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoice_meta_tolerates_null_pdf_and_extra_fields() {
        let meta: InvoiceMeta = serde_json::from_value(json!({
            "invoice_no": "SP-2026-0042",
            "invoice_date": "2026-10-18",
            "order_id": 42,
            "pdf_url": null,
            "message": "Invoice generated successfully."
        }))
        .unwrap();

        assert_eq!(meta.invoice_no, "SP-2026-0042");
        assert_eq!(meta.order_id, 42);
        assert_eq!(meta.pdf_url, None);
    }
}
