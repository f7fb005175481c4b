use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{PredictionResponse, UPLOAD_FIELD, UploadError};
use wasm_bindgen::JsValue;

/// Prediction endpoint, overridable at build time with `PREDICT_URL`.
pub const PREDICT_URL: &str = match option_env!("PREDICT_URL") {
    Some(url) => url,
    None => "/predict",
};

fn js_error(err: JsValue) -> UploadError {
    UploadError::Network(format!("{:?}", err))
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

/// One POST, no retry. The request cannot be aborted once sent.
pub async fn send_prediction_request(file: GlooFile) -> Result<PredictionResponse, UploadError> {
    let form_data = web_sys::FormData::new().map_err(js_error)?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, file.as_ref(), &file.name())
        .map_err(js_error)?;

    let response = Request::post(PREDICT_URL)
        .body(form_data)
        .map_err(|e| UploadError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if let Some(detail) = error_detail(&body) {
            log::warn!("Prediction rejected ({}): {}", status, detail);
        }
        return Err(UploadError::Status { status, body });
    }

    response
        .json::<PredictionResponse>()
        .await
        .map_err(|e| UploadError::Parse(e.to_string()))
}
