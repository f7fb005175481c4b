use super::super::{Model, Msg};
use yew::prelude::*;

pub struct Card {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const CARDS: &[Card] = &[
    Card {
        icon: "fa-solid fa-wave-square",
        title: "Signal Acquisition",
        body: "Raw multichannel EEG exported from OpenBCI or the STEW dataset.",
    },
    Card {
        icon: "fa-solid fa-filter",
        title: "Preprocessing",
        body: "Band-pass filtering and segmentation into overlapping windows.",
    },
    Card {
        icon: "fa-solid fa-chart-simple",
        title: "Feature Extraction",
        body: "Spectral band power per channel feeds the classifier.",
    },
    Card {
        icon: "fa-solid fa-brain",
        title: "Classification",
        body: "Window-level predictions are aggregated into one verdict.",
    },
    Card {
        icon: "fa-solid fa-magnifying-glass-chart",
        title: "Explainability",
        body: "Attribution maps show which channels drove the decision.",
    },
    Card {
        icon: "fa-solid fa-map",
        title: "Topographic Maps",
        body: "Scalp maps place activity on the electrode layout.",
    },
];

pub fn render_carousel(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <section class="carousel-section">
            <button id="prev-btn" class="carousel-btn" onclick={link.callback(|_| Msg::CarouselPrev)}>
                <i class="fa-solid fa-chevron-left"></i>
            </button>
            <div class="carousel">
                { for CARDS.iter().enumerate().map(|(index, card)| html! {
                    <div
                        key={index}
                        class={classes!("card", model.carousel.slot(index).class_name())}
                        onclick={link.callback(move |_| Msg::CardClicked(index))}
                    >
                        <i class={card.icon}></i>
                        <h3>{ card.title }</h3>
                        <p>{ card.body }</p>
                    </div>
                })}
            </div>
            <button id="next-btn" class="carousel-btn" onclick={link.callback(|_| Msg::CarouselNext)}>
                <i class="fa-solid fa-chevron-right"></i>
            </button>
        </section>
    }
}
