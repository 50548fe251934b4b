use serde::{Deserialize, Serialize};

/// Body a client POSTs to a frame's post URL when a button is pressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
    pub trusted_data: TrustedData,
    /// Client-reported copy of the action. Never used to decide validity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untrusted_data: Option<UntrustedData>,
}

impl FrameActionPayload {
    pub fn from_message_bytes(message_bytes: impl Into<String>) -> Self {
        Self {
            trusted_data: TrustedData {
                message_bytes: message_bytes.into(),
            },
            untrusted_data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    /// Hex-encoded protobuf `Message`.
    pub message_bytes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UntrustedData {
    pub fid: u64,
    pub url: String,
    pub message_hash: String,
    pub timestamp: u64,
    pub network: u32,
    pub button_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    pub cast_id: UntrustedCastId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UntrustedCastId {
    pub fid: u64,
    pub hash: String,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_client_packet() {
        let payload: FrameActionPayload = serde_json::from_value(serde_json::json!({
            "untrustedData": {
                "fid": 2,
                "url": "https://fcpolls.com/polls/1",
                "messageHash": "0xd2b1ddc6c88e865a33cb1a565e0058d757042974",
                "timestamp": 1706243218,
                "network": 1,
                "buttonIndex": 2,
                "castId": { "fid": 226, "hash": "0xa48dd46161d8e57725f5e26e34ec19c13ff7f3b9" }
            },
            "trustedData": { "messageBytes": "0a49080d" }
        }))
        .unwrap();

        assert_eq!(payload.trusted_data.message_bytes, "0a49080d");
        let untrusted = payload.untrusted_data.unwrap();
        assert_eq!(untrusted.button_index, 2);
        assert_eq!(untrusted.cast_id.fid, 226);
        assert!(untrusted.input_text.is_none());
    }

    #[test]
    fn trusted_data_is_required() {
        let result: Result<FrameActionPayload, _> =
            serde_json::from_value(serde_json::json!({ "untrustedData": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn untrusted_data_is_optional() {
        let payload: FrameActionPayload =
            serde_json::from_str(r#"{"trustedData":{"messageBytes":""}}"#).unwrap();
        assert!(payload.untrusted_data.is_none());
    }
}
