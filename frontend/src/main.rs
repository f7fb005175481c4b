mod api;
mod components;

use components::carousel::{CARDS, render_carousel};
use components::handlers;
use components::header::render_header;
use components::results::render_result_card;
use components::upload_section::render_upload_section;
use gloo_file::File as GlooFile;
use gloo_timers::callback::{Interval, Timeout};
use shared::{AttemptId, Carousel, PredictionResponse, UploadError, UploadSession};
use web_sys::{DragEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Input events
    FileChosen(GlooFile),
    HandleDrop(DragEvent),
    SetDragging(bool),

    // Upload lifecycle
    Tick(AttemptId),
    UploadFinished(AttemptId, Result<PredictionResponse, UploadError>),
    Reveal(AttemptId),

    // Carousel
    CarouselNext,
    CarouselPrev,
    CardClicked(usize),
}

// Main component
pub struct Model {
    session: UploadSession,
    is_dragging: bool,
    carousel: Carousel,
    progress_interval: Option<Interval>,
    finalize_timeout: Option<Timeout>,
    scroll_to_result: bool,
    result_card: NodeRef,
}

impl Model {
    fn cancel_timers(&mut self) {
        if let Some(interval) = self.progress_interval.take() {
            interval.cancel();
        }
        if let Some(timeout) = self.finalize_timeout.take() {
            timeout.cancel();
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: UploadSession::new(),
            is_dragging: false,
            carousel: Carousel::new(CARDS.len()),
            progress_interval: None,
            finalize_timeout: None,
            scroll_to_result: false,
            result_card: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Input events
            Msg::FileChosen(file) => handlers::start_upload(self, ctx, file),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::SetDragging(is_dragging) => {
                let changed = self.is_dragging != is_dragging;
                self.is_dragging = is_dragging;
                changed
            }

            // Upload lifecycle
            Msg::Tick(id) => handlers::handle_tick(self, id),
            Msg::UploadFinished(id, result) => {
                handlers::handle_upload_finished(self, ctx, id, result)
            }
            Msg::Reveal(id) => handlers::handle_reveal(self, id),

            // Carousel
            Msg::CarouselNext => {
                self.carousel.next();
                true
            }
            Msg::CarouselPrev => {
                self.carousel.prev();
                true
            }
            Msg::CardClicked(index) => self.carousel.click(index),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_carousel(self, ctx) }
                    { render_upload_section(self, ctx) }
                    { render_result_card(self) }
                </main>

                <footer class="app-footer">
                    <p>{"NeuroCompute | EEG burnout screening prototype"}</p>
                </footer>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.scroll_to_result {
            self.scroll_to_result = false;
            if let Some(card) = self.result_card.cast::<web_sys::Element>() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                card.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.cancel_timers();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
