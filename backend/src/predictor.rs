use crate::config::GatewayConfig;
use crate::error::GatewayError;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::{PredictionDetails, PredictionResponse, UPLOAD_FIELD};
use std::time::Duration;

pub const COMPLETED_MESSAGE: &str = "Prototype analysis completed.";

/// HTTP client for the external EEG prediction service.
#[derive(Clone)]
pub struct PredictorClient {
    client: reqwest::Client,
    url: String,
}

impl PredictorClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.predictor_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the recording upstream and returns its raw JSON result.
    pub async fn predict(&self, filename: &str, contents: Vec<u8>) -> Result<Value, GatewayError> {
        let part = Part::bytes(contents).file_name(filename.to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(GatewayError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

fn confidence_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format!("{}%", n)),
        _ => None,
    }
}

/// Wraps the upstream result the way the browser app expects it: headline
/// fields at the top, the full result echoed under `details`.
pub fn build_envelope(filename: &str, result: Value) -> Result<PredictionResponse, GatewayError> {
    let prediction = result
        .get("prediction")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::InvalidResponse("missing `prediction`".into()))?
        .to_string();
    let confidence = result
        .get("confidence")
        .and_then(confidence_text)
        .ok_or_else(|| GatewayError::InvalidResponse("missing `confidence`".into()))?;

    let details: PredictionDetails = serde_json::from_value(result)
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    Ok(PredictionResponse {
        filename: Some(filename.to_string()),
        prediction,
        confidence,
        details,
        image_base64: None,
        xai_base64: None,
        topomap_base64: None,
        message: Some(COMPLETED_MESSAGE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::ImagePanel;

    #[test]
    fn envelope_keeps_full_result_in_details() {
        let result = json!({
            "prediction": "Burnout",
            "confidence": "91.2%",
            "windows_analyzed": 30,
            "xai_base64": "iVBORw0KGgo=",
            "channel_scores": {"Fp1": 0.4}
        });

        let envelope = build_envelope("s07.txt", result).unwrap();
        assert_eq!(envelope.filename.as_deref(), Some("s07.txt"));
        assert_eq!(envelope.prediction, "Burnout");
        assert_eq!(envelope.confidence, "91.2%");
        assert_eq!(envelope.message.as_deref(), Some(COMPLETED_MESSAGE));
        assert_eq!(envelope.details.windows_analyzed, Some(30));
        assert_eq!(envelope.image(ImagePanel::Xai), Some("iVBORw0KGgo="));

        let echoed = serde_json::to_value(&envelope).unwrap();
        assert_eq!(echoed["details"]["prediction"], "Burnout");
        assert_eq!(echoed["details"]["channel_scores"]["Fp1"], 0.4);
        assert!(echoed.get("image_base64").is_none());
    }

    #[test]
    fn numeric_confidence_gets_percent_sign() {
        let envelope =
            build_envelope("s.txt", json!({"prediction": "Relaxed", "confidence": 72.5})).unwrap();
        assert_eq!(envelope.confidence, "72.5%");
    }

    #[test]
    fn result_without_prediction_is_rejected() {
        let err = build_envelope("s.txt", json!({"confidence": "50%"})).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
