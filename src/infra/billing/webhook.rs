//! Payment-provider webhook envelope: signature check and the payload shapes
//! the service reacts to.
//!
//! Every delivery carries a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. The signed message is
//! `"{t}.{raw body}"`, keyed with the endpoint's webhook secret.

use chrono::{DateTime, TimeZone, Utc};
use ring::hmac;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Deliveries older (or newer) than this many seconds are refused.
pub const TOLERANCE_SECS: i64 = 300;

pub fn verify_signature(header: Option<&str>, body: &[u8], secret: &str, now: i64) -> Result<(), AppError> {
    let header = header.ok_or_else(|| AppError::Validation("missing webhook signature".into()))?;
    if secret.is_empty() {
        return Err(AppError::Validation("webhook secret not configured".into()));
    }

    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| AppError::Validation("invalid webhook signature".into()))?;
    if (now - timestamp).abs() > TOLERANCE_SECS {
        return Err(AppError::Validation("webhook timestamp outside tolerance".into()));
    }

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let mut message = Vec::with_capacity(body.len() + 16);
    message.extend_from_slice(timestamp.to_string().as_bytes());
    message.push(b'.');
    message.extend_from_slice(body);

    let matched = signatures.iter()
        .filter_map(|sig| hex::decode(sig).ok())
        .any(|sig| hmac::verify(&key, &message, &sig).is_ok());

    if matched {
        Ok(())
    } else {
        Err(AppError::Validation("invalid webhook signature".into()))
    }
}

/// Builds a header value accepted by [`verify_signature`].
pub fn sign(body: &[u8], secret: &str, timestamp: i64) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let mut message = format!("{}.", timestamp).into_bytes();
    message.extend_from_slice(body);
    let tag = hmac::sign(&key, &message);
    format!("t={},v1={}", timestamp, hex::encode(tag.as_ref()))
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: Value,
}

/// Provider references may arrive as a bare id or as an expanded object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object { id: String },
}

impl Expandable {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object { id } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionObject {
    pub client_reference_id: Option<String>,
    pub customer: Option<Expandable>,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,
    pub customer: Expandable,
    pub status: String,
    pub current_period_end: Option<i64>,
    pub items: SubscriptionItems,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionItems {
    pub data: Vec<SubscriptionItem>,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionItem {
    pub price: Price,
    pub current_period_end: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Price {
    pub id: String,
}

impl SubscriptionObject {
    pub fn price_id(&self) -> Option<&str> {
        self.items.data.first().map(|item| item.price.id.as_str())
    }

    /// Newer API versions moved the period end onto the subscription item.
    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        let secs = self.current_period_end
            .or_else(|| self.items.data.first().and_then(|item| item.current_period_end))?;
        Utc.timestamp_opt(secs, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    #[test]
    fn test_valid_signature_passes() {
        let body = br#"{"type":"ping"}"#;
        let header = sign(body, SECRET, 1_700_000_000);
        assert!(verify_signature(Some(&header), body, SECRET, 1_700_000_010).is_ok());
    }

    #[test]
    fn test_tampered_body_fails() {
        let header = sign(b"original", SECRET, 1_700_000_000);
        let result = verify_signature(Some(&header), b"tampered", SECRET, 1_700_000_000);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stale_timestamp_fails() {
        let body = b"{}";
        let header = sign(body, SECRET, 1_700_000_000);
        let result = verify_signature(Some(&header), body, SECRET, 1_700_000_000 + TOLERANCE_SECS + 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_or_malformed_header_fails() {
        assert!(verify_signature(None, b"{}", SECRET, 0).is_err());
        assert!(verify_signature(Some("v1=abcd"), b"{}", SECRET, 0).is_err());
        assert!(verify_signature(Some("t=0,v1=not-hex"), b"{}", SECRET, 0).is_err());
    }

    #[test]
    fn test_any_of_several_signatures_may_match() {
        let body = b"{}";
        let good = sign(body, SECRET, 100);
        let v1 = good.split_once(",v1=").map(|(_, v)| v).unwrap();
        let header = format!("t=100,v1=deadbeef,v1={}", v1);
        assert!(verify_signature(Some(&header), body, SECRET, 100).is_ok());
    }

    #[test]
    fn test_subscription_period_end_falls_back_to_item() {
        let obj: SubscriptionObject = serde_json::from_value(serde_json::json!({
            "id": "sub_1",
            "customer": {"id": "cus_1"},
            "status": "active",
            "items": {"data": [{"price": {"id": "price_1"}, "current_period_end": 1_800_000_000}]}
        })).unwrap();

        assert_eq!(obj.customer.id(), "cus_1");
        assert_eq!(obj.price_id(), Some("price_1"));
        assert_eq!(obj.period_end().map(|d| d.timestamp()), Some(1_800_000_000));
    }
}
