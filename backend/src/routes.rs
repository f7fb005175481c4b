use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::predictor::{PredictorClient, build_envelope};
use actix_files::{Files, NamedFile};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use serde_json::json;
use shared::{ACCEPTED_EXTENSION, UPLOAD_FIELD};
use std::path::PathBuf;
use uuid::Uuid;

/// Pages the old server-rendered site had. They all load the app now.
const LEGACY_PAGES: [&str; 3] = ["/analysis", "/aboutme", "/how-it-works"];

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    configure_api(cfg);

    let index = frontend_dir.join("index.html");
    for page in LEGACY_PAGES {
        let index = index.clone();
        cfg.route(
            page,
            web::get().to(move || {
                let index = index.clone();
                async move { NamedFile::open_async(index).await }
            }),
        );
    }

    // Catch-all, must stay last.
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/health").route(web::get().to(health)));
}

struct Upload {
    filename: String,
    contents: Vec<u8>,
}

/// Pulls the `file` field out of the form. Other fields are skipped.
async fn read_upload(payload: &mut Multipart, limit: usize) -> Result<Upload, GatewayError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            while field.try_next().await?.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        if !filename.ends_with(ACCEPTED_EXTENSION) {
            warn!("Rejected upload with unsupported name {:?}", filename);
            return Err(GatewayError::InvalidExtension);
        }

        let mut contents = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if contents.len() + data.len() > limit {
                warn!("Rejected {}: larger than {} bytes", filename, limit);
                return Err(GatewayError::PayloadTooLarge { limit });
            }
            contents.extend_from_slice(&data);
        }

        return Ok(Upload { filename, contents });
    }

    Err(GatewayError::MissingFile)
}

async fn handle_predict(
    config: web::Data<GatewayConfig>,
    predictor: web::Data<PredictorClient>,
    mut payload: Multipart,
) -> Result<HttpResponse, GatewayError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(&mut payload, config.max_upload_bytes).await?;

    info!(
        "[{}] Forwarding {} ({} bytes) to {}",
        request_id,
        upload.filename,
        upload.contents.len(),
        predictor.url()
    );

    let result = predictor
        .predict(&upload.filename, upload.contents)
        .await
        .inspect_err(|e| error!("[{}] Prediction failed: {}", request_id, e))?;
    let envelope = build_envelope(&upload.filename, result)
        .inspect_err(|e| error!("[{}] {}", request_id, e))?;

    info!(
        "[{}] {}: {} ({})",
        request_id, upload.filename, envelope.prediction, envelope.confidence
    );
    Ok(HttpResponse::Ok().json(envelope))
}

async fn health(predictor: web::Data<PredictorClient>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "predictor_url": predictor.url(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, HttpServer, test};
    use serde_json::Value;
    use shared::{ImagePanel, PredictionResponse, PredictionView};
    use std::net::TcpListener;
    use std::sync::Mutex;

    const BOUNDARY: &str = "----neurocompute-test-boundary";

    fn form(field: &str, filename: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY
        )
    }

    fn post_form(body: String) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/predict")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    fn config() -> GatewayConfig {
        GatewayConfig {
            // Nothing listens on the discard port.
            predictor_url: "http://127.0.0.1:9/predict".into(),
            max_upload_bytes: 64,
            upstream_timeout_secs: 5,
            ..GatewayConfig::default()
        }
    }

    /// (field name, filename, byte count) of every part the fake predictor got.
    type Received = web::Data<Mutex<Vec<(String, String, usize)>>>;

    async fn fake_predict(received: Received, mut payload: Multipart) -> HttpResponse {
        while let Some(mut field) = payload.try_next().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or_default()
                .to_string();
            let mut len = 0;
            while let Some(chunk) = field.try_next().await.unwrap() {
                len += chunk.len();
            }
            received.lock().unwrap().push((name, filename, len));
        }

        HttpResponse::Ok().json(json!({
            "prediction": "Burnout",
            "confidence": "88.0%",
            "windows_analyzed": 7,
            "topomap_base64": "QUJD"
        }))
    }

    /// Starts a stand-in prediction service on a free port.
    fn spawn_predictor() -> (String, Received) {
        let received: Received = web::Data::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let data = received.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/predict", web::post().to(fake_predict))
                .route(
                    "/broken",
                    web::post().to(|| async {
                        HttpResponse::InternalServerError()
                            .json(json!({"detail": "AI System is not ready."}))
                    }),
                )
                .route(
                    "/garbled",
                    web::post().to(|| async {
                        HttpResponse::Ok()
                            .content_type("text/html")
                            .body("<html>maintenance</html>")
                    }),
                )
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);

        (format!("http://{}", addr), received)
    }

    fn config_for(predictor_url: String) -> GatewayConfig {
        GatewayConfig {
            predictor_url,
            ..config()
        }
    }

    macro_rules! gateway {
        ($config:expr) => {{
            let config = $config;
            let predictor = PredictorClient::new(&config).unwrap();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(config))
                    .app_data(web::Data::new(predictor))
                    .configure(configure_api),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn rejects_non_txt_upload() {
        let app = gateway!(config());
        let resp = test::call_service(&app, post_form(form("file", "scan.edf", "0 1 2")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Only .txt is allowed.");
    }

    #[actix_web::test]
    async fn requires_file_field() {
        let app = gateway!(config());
        let resp = test::call_service(&app, post_form(form("upload", "s01.txt", "0 1 2")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "No file provided.");
    }

    #[actix_web::test]
    async fn enforces_upload_limit() {
        let app = gateway!(config());
        let big = "7".repeat(200);
        let resp = test::call_service(&app, post_form(form("file", "s01.txt", &big)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn unreachable_predictor_is_reported() {
        let app = gateway!(config());
        let resp = test::call_service(&app, post_form(form("file", "s01.txt", "1 2 3")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Prediction service is not reachable.");
    }

    #[actix_web::test]
    async fn forwards_recording_and_wraps_result() {
        let (base, received) = spawn_predictor();
        let app = gateway!(config_for(format!("{}/predict", base)));

        let resp = test::call_service(&app, post_form(form("file", "s01.txt", "1 2 3 4")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: PredictionResponse = test::read_body_json(resp).await;

        assert_eq!(body.filename.as_deref(), Some("s01.txt"));
        assert_eq!(body.prediction, "Burnout");
        assert_eq!(body.confidence, "88.0%");
        assert_eq!(body.message.as_deref(), Some("Prototype analysis completed."));
        assert_eq!(body.details.windows_analyzed, Some(7));
        assert_eq!(body.image(ImagePanel::Topomap), Some("QUJD"));

        let view = PredictionView::from_response(&body);
        assert!((view.marker_position - 90.0).abs() < 1e-9);
        assert_eq!(view.images.len(), 1);

        let received = received.lock().unwrap().clone();
        assert_eq!(received, vec![("file".to_string(), "s01.txt".to_string(), 7)]);
    }

    #[actix_web::test]
    async fn upstream_error_status_is_bad_gateway() {
        let (base, _) = spawn_predictor();
        let app = gateway!(config_for(format!("{}/broken", base)));

        let resp = test::call_service(&app, post_form(form("file", "s01.txt", "1 2 3")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Prediction service failed with status 500"));
        assert!(detail.contains("AI System is not ready."));
    }

    #[actix_web::test]
    async fn non_json_upstream_is_bad_gateway() {
        let (base, _) = spawn_predictor();
        let app = gateway!(config_for(format!("{}/garbled", base)));

        let resp = test::call_service(&app, post_form(form("file", "s01.txt", "1 2 3")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Prediction service returned an invalid response")
        );
    }

    #[actix_web::test]
    async fn legacy_pages_serve_the_app() {
        let dir = std::env::temp_dir().join(format!("neurocompute-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<div id=\"app\"></div>").unwrap();

        let frontend_dir = dir.clone();
        let app = test::init_service(
            App::new().configure(move |cfg| configure_routes(cfg, frontend_dir)),
        )
        .await;

        for page in LEGACY_PAGES {
            let req = test::TestRequest::get().uri(page).to_request();
            let body = test::call_and_read_body(&app, req).await;
            assert_eq!(body, "<div id=\"app\"></div>", "{}", page);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[actix_web::test]
    async fn health_reports_upstream() {
        let app = gateway!(config());
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["predictor_url"], "http://127.0.0.1:9/predict");
    }
}
