//! Payload delivered to browsers for a queued deal alert.

use serde::Serialize;

/// Value of the `type` discriminator in every deal alert payload.
pub const DEAL_ALERT_TYPE: &str = "deal_alert";

/// JSON body pushed to a subscription: `{"type": "deal_alert", "deal_id": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealAlertPayload<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub deal_id: &'a str,
}

impl<'a> DealAlertPayload<'a> {
    pub fn new(deal_id: &'a str) -> Self {
        Self {
            kind: DEAL_ALERT_TYPE,
            deal_id,
        }
    }

    /// Serialize to the UTF-8 JSON string handed to the push sender.
    pub fn to_json(&self) -> String {
        // Serializing two string fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
