//! Response envelopes
//!
//! The backend answers either with the payload itself or wrapped as
//! `{"data": ...}` / `{"code": ..., "message": ..., "data": ...}`. Both
//! shapes are decoded at the boundary into [`Payload`], so callers match an
//! exhaustive enum instead of probing for a `data` field.
//!
//! # Example
//!
//! ```
//! use adminboard_shared::models::Payload;
//!
//! let bare: Payload<u32> = serde_json::from_str("7").unwrap();
//! let wrapped: Payload<u32> = serde_json::from_str(r#"{"code":0,"data":7}"#).unwrap();
//! assert_eq!(bare.into_inner(), wrapped.into_inner());
//! ```

use serde::{Deserialize, Serialize};

/// `{code?, message?, data}` wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Application status code, when the backend sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    /// Human-readable status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The wrapped payload
    pub data: T,
}

/// A payload that arrived either enveloped or bare
///
/// The enveloped form is tried first; an object without a `data` field
/// that decodes as `T` is taken as bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// `{data: T}` or `{code, message, data: T}`
    Enveloped(Envelope<T>),

    /// `T` itself
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwraps the payload regardless of shape
    pub fn into_inner(self) -> T {
        match self {
            Payload::Enveloped(envelope) => envelope.data,
            Payload::Bare(data) => data,
        }
    }

    /// Whether the payload came wrapped in an envelope
    pub fn is_enveloped(&self) -> bool {
        matches!(self, Payload::Enveloped(_))
    }
}
