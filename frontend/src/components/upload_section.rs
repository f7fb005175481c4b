use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, first_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section id="analysis" class="upload-section">
            <h2>{"Analyze a recording"}</h2>
            { render_file_input_area(model, ctx) }
        </section>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        // Allows picking the same file again.
        input.set_value("");

        file.map(Msg::FileChosen)
    });

    let handle_drag_enter = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::SetDragging(true)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(|e: DragEvent| {
        e.stop_propagation();
        Msg::HandleDrop(e)
    });

    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept=".txt"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("dragover"))}
                ondragenter={handle_drag_enter}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop an EEG recording here, or click to browse"}</p>
                    <p class="file-types">{"Supported format: OpenBCI / STEW .txt export"}</p>
                </div>
            </div>
        </>
    }
}
