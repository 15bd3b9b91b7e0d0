use crate::error::Rejection;
use crate::messages::{AddonMessage, MessageType};
use serde::Serialize;
use serde_json::Value;

/// Encode any serde-serializable message into the JSON text posted across the frame boundary.
pub fn encode_message<T: Serialize + ?Sized>(msg: &T) -> serde_json::Result<String> {
    serde_json::to_string(msg)
}

/// Inbound text that parsed as a JSON object with a non-empty `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope {
    pub message_type: String,
    pub body: Value,
}

/// First decoding stage: parse `data` and pull out the discriminant without interpreting it.
pub fn decode_envelope(data: &str) -> Result<RawEnvelope, Rejection> {
    let body: Value = serde_json::from_str(data).map_err(|_| Rejection::InvalidJson)?;
    if !body.is_object() {
        return Err(Rejection::InvalidJson);
    }
    let message_type = match body.get("type") {
        Some(Value::String(ty)) if !ty.is_empty() => ty.clone(),
        _ => return Err(Rejection::MissingType),
    };
    Ok(RawEnvelope { message_type, body })
}

/// Second decoding stage: decode the envelope into its typed shape.
///
/// The caller has already classified the discriminant; a failure here means the body does not
/// match the shape registered for `ty`.
pub fn decode_message(ty: MessageType, envelope: RawEnvelope) -> Result<AddonMessage, Rejection> {
    let msg: AddonMessage = serde_json::from_value(envelope.body)
        .map_err(|e| Rejection::InvalidShape(format!("{ty}: {e}")))?;
    debug_assert_eq!(msg.message_type(), ty);
    Ok(msg)
}
