use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-brain"></i> {" NeuroCompute"}</h1>
            <p class="subtitle">{"Burnout screening from raw EEG recordings"}</p>
        </header>
    }
}
