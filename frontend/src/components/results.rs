use super::super::Model;
use shared::{ImagePanel, PredictionView};
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_result_card(model: &Model) -> Html {
    let session = &model.session;
    let result = session.result();

    html! {
        <div
            id="result-card"
            ref={model.result_card.clone()}
            class={classes!("result-card", (!session.card_visible()).then_some("hidden"))}
        >
            <h2
                id="result-title"
                style={format!("color: {};", session.title_color())}
                title={session.filename().map(|name| format!("Analysis results for: {}", name))}
            >
                { session.title() }
            </h2>

            <div class={classes!("distance-visualizer", session.is_loading().then_some("loading"))}>
                <div class="dist-labels">
                    <span class="dist-label relaxed">{"Relaxed"}</span>
                    <span class="dist-label burnout">{"Burnout"}</span>
                </div>
                <div class="dist-track">
                    <div
                        id="dist-bar"
                        class="dist-bar-fill"
                        style={format!(
                            "width: {}%; transition: {};",
                            session.bar_width(),
                            session.bar_transition()
                        )}
                    ></div>
                    <div
                        id="dist-marker"
                        class="dist-marker"
                        style={format!("left: {}%;", result.map_or(50.0, |view| view.marker_position))}
                    ></div>
                </div>
            </div>

            <div class="result-stats">
                <div class="stat">
                    <span class="stat-label">{"Confidence"}</span>
                    <span id="confidence-value" class="stat-value">
                        { result.map_or("--", |view| view.confidence.as_str()) }
                    </span>
                </div>
                <div class="stat">
                    <span class="stat-label">{"Windows analyzed"}</span>
                    <span id="window-value" class="stat-value">
                        { result.map_or("--", |view| view.windows.as_str()) }
                    </span>
                </div>
            </div>

            <div class="image-panels">
                { for ImagePanel::iter().map(|panel| render_image_panel(panel, result)) }
            </div>
        </div>
    }
}

/// Panels stay hidden unless the response carried their image.
fn render_image_panel(panel: ImagePanel, result: Option<&PredictionView>) -> Html {
    let source = result.and_then(|view| view.image(panel));

    html! {
        <div
            id={panel.container_id()}
            class={classes!("image-panel", source.is_none().then_some("hidden"))}
        >
            <h3>{ panel.title() }</h3>
            <img id={panel.img_id()} src={source.map(str::to_string)} alt={panel.title()} />
        </div>
    }
}
