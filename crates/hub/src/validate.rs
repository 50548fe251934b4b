//! Decide whether an inbound frame action is genuine.

use std::sync::Arc;

use {
    frames_config::HubConfig,
    prost::Message as _,
    tracing::{debug, warn},
};

use crate::{
    error::Result,
    hub::{HttpHubClient, ValidationResponse, VerificationService},
    payload::FrameActionPayload,
    proto::Message,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Skip the hub and only decode the message. The result is never valid,
    /// but carries the decoded frame action for local development.
    pub ignore_signature: bool,
}

/// Outcome of validating a frame action.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameValidation {
    pub is_valid: bool,
    /// The verified message; `None` whenever `is_valid` is false, except in
    /// [`ValidateOptions::ignore_signature`] mode.
    pub message: Option<Message>,
}

impl FrameValidation {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            message: None,
        }
    }
}

/// Decode hex `messageBytes` into a [`Message`].
pub fn decode_message_bytes(message_bytes: &str) -> Result<Message> {
    decode_with_bytes(message_bytes).map(|(message, _)| message)
}

/// The decoded message together with the exact bytes it came from.
fn decode_with_bytes(message_bytes: &str) -> Result<(Message, Vec<u8>)> {
    let bytes = hex::decode(message_bytes.trim())?;
    let message = Message::decode(bytes.as_slice())?;
    Ok((message, bytes))
}

/// Validate `payload` with `service`.
///
/// `Err` is returned only when the payload cannot be decoded. Every other
/// failure (hub unreachable, invalid signature, not a frame action) yields
/// [`FrameValidation::invalid`].
pub async fn validate_frame_action(
    payload: &FrameActionPayload,
    service: &dyn VerificationService,
    options: &ValidateOptions,
) -> Result<FrameValidation> {
    let (message, encoded) = decode_with_bytes(&payload.trusted_data.message_bytes)?;

    if options.ignore_signature {
        debug!("signature check skipped, returning unverified message");
        return Ok(if message.is_frame_action() {
            FrameValidation {
                is_valid: false,
                message: Some(message),
            }
        } else {
            FrameValidation::invalid()
        });
    }

    let response = match service.validate_encoded(&message, &encoded).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "hub verification failed");
            return Ok(FrameValidation::invalid());
        },
    };

    Ok(match response {
        ValidationResponse {
            valid: true,
            message: Some(validated),
        } if validated.is_frame_action() => FrameValidation {
            is_valid: true,
            message: Some(validated),
        },
        ValidationResponse { valid, message } => {
            debug!(
                valid,
                has_message = message.is_some(),
                message_type = ?message.as_ref().and_then(Message::message_type),
                "frame action rejected"
            );
            FrameValidation::invalid()
        },
    })
}

/// Validates frame actions against a verification service chosen at
/// construction time.
#[derive(Clone)]
pub struct FrameValidator {
    service: Arc<dyn VerificationService>,
}

impl FrameValidator {
    pub fn new(service: Arc<dyn VerificationService>) -> Self {
        Self { service }
    }

    /// Validator backed by the HTTP hub described by `config`.
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpHubClient::from_config(config)?)))
    }

    pub async fn validate(
        &self,
        payload: &FrameActionPayload,
        options: &ValidateOptions,
    ) -> Result<FrameValidation> {
        validate_frame_action(payload, self.service.as_ref(), options).await
    }
}
