use super::super::{Model, Msg};
use super::utils::{alert, first_file};
use crate::api::send_prediction_request;
use gloo_file::File as GlooFile;
use gloo_timers::callback::{Interval, Timeout};
use shared::progress::{FINALIZE_DELAY_MS, TICK_INTERVAL_MS};
use shared::{AttemptId, PredictionResponse, UploadError};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|dt| dt.files())
        .and_then(|files| first_file(&files))
    {
        start_upload(model, ctx, file);
    }

    true
}

pub fn start_upload(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let filename = file.name();
    let id = match model.session.begin(&filename) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Rejected {}: {}", filename, e);
            if e.is_rejection() {
                alert(&e.to_string());
            }
            return false;
        }
    };

    // A new upload supersedes whatever was running.
    model.cancel_timers();
    model.scroll_to_result = true;
    log::info!("Uploading {} as attempt {}", filename, id);

    let link = ctx.link().clone();
    model.progress_interval = Some(Interval::new(TICK_INTERVAL_MS, move || {
        link.send_message(Msg::Tick(id));
    }));

    send_analysis_request(ctx, id, file);
    true
}

pub fn handle_tick(model: &mut Model, id: AttemptId) -> bool {
    model.session.tick(id, js_sys::Math::random())
}

pub fn handle_upload_finished(
    model: &mut Model,
    ctx: &Context<Model>,
    id: AttemptId,
    result: Result<PredictionResponse, UploadError>,
) -> bool {
    match result {
        Ok(response) => {
            if !model.session.complete(id, response) {
                log::debug!("Dropping response of superseded attempt {}", id);
                return false;
            }
            if let Some(interval) = model.progress_interval.take() {
                interval.cancel();
            }

            let link = ctx.link().clone();
            model.finalize_timeout = Some(Timeout::new(FINALIZE_DELAY_MS, move || {
                link.send_message(Msg::Reveal(id));
            }));
            true
        }
        Err(e) => {
            if !model.session.fail(id, &e) {
                log::debug!("Dropping error of superseded attempt {}: {}", id, e);
                return false;
            }
            model.cancel_timers();
            gloo_console::error!(format!("Error: {:?}", e));
            true
        }
    }
}

pub fn handle_reveal(model: &mut Model, id: AttemptId) -> bool {
    let revealed = model.session.reveal(id);
    if revealed {
        model.finalize_timeout = None;
    }
    revealed
}

pub fn send_analysis_request(ctx: &Context<Model>, id: AttemptId, file: GlooFile) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let result = send_prediction_request(file).await;
            link.send_message(Msg::UploadFinished(id, result));
        }
    });
}
