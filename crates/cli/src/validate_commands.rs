use {
    anyhow::{Context, Result},
    frames_config::FramesConfig,
    frames_hub::{
        ActionSummary, FrameActionPayload, FrameValidation, FrameValidator, ValidateOptions,
    },
    serde::Serialize,
    tracing::info,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateOutput {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<ActionSummary>,
}

impl From<&FrameValidation> for ValidateOutput {
    fn from(validation: &FrameValidation) -> Self {
        Self {
            is_valid: validation.is_valid,
            action: validation
                .message
                .as_ref()
                .and_then(ActionSummary::from_message),
        }
    }
}

pub async fn handle_validate(
    config: &FramesConfig,
    body: &str,
    ignore_signature: bool,
) -> Result<()> {
    let payload: FrameActionPayload =
        serde_json::from_str(body).context("input is not a frame action request body")?;

    let validator = FrameValidator::from_config(&config.hub)?;
    info!(hub = %config.hub.http_url, ignore_signature, "validating frame action");
    let validation = validator
        .validate(&payload, &ValidateOptions { ignore_signature })
        .await?;

    let output = ValidateOutput::from(&validation);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
