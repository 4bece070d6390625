//! Scribble Web - Browser Glyph Sketchpad
//!
//! This crate provides a WebAssembly-based UI for the Scribble classifier.
//! Draw a digit (0-9) or letter (A-Z) on the canvas; the drawing is
//! normalized to a 28x28 preview and classified by a small network trained
//! locally in the browser on synthetic samples.

mod processing;
mod state;

use scribble_core::GlyphMode;
use state::{AppState, TrainingStatus, BRUSH_SIZE, DRAW_SIZE, PREVIEW_SCALE};
use sycamore::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Initialize the web application
#[wasm_bindgen(start)]
pub fn main() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Scribble starting...");

    // Mount the Sycamore application
    sycamore::render(App);

    log::info!("Scribble initialized");
}

/// Fetch a canvas element and its 2D context from a node ref.
fn canvas_and_context(node_ref: &NodeRef) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas: HtmlCanvasElement = node_ref.get().unchecked_into();
    let ctx = canvas
        .get_context("2d")
        .ok()??
        .unchecked_into::<CanvasRenderingContext2d>();
    Some((canvas, ctx))
}

/// White-fill the drawing surface and configure the brush. Runs once before
/// the first stroke and again on every clear; an unfilled canvas reads back
/// as transparent black, which the pipeline would take for ink.
fn reset_surface(ctx: &CanvasRenderingContext2d) {
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, DRAW_SIZE as f64, DRAW_SIZE as f64);
    ctx.set_stroke_style_str("#000000");
    ctx.set_line_width(BRUSH_SIZE);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
}

/// Read the drawing surface back into the session and refresh the preview.
fn sync_drawing(app: &AppState, draw_ref: &NodeRef, preview_ref: &NodeRef) {
    let Some((_, ctx)) = canvas_and_context(draw_ref) else {
        return;
    };
    let Ok(image_data) = ctx.get_image_data(0.0, 0.0, DRAW_SIZE as f64, DRAW_SIZE as f64) else {
        log::error!("failed to read drawing surface");
        return;
    };

    match processing::raster_from_canvas_bytes(DRAW_SIZE, DRAW_SIZE, image_data.data().0) {
        Ok(raster) => {
            app.session.update_drawing(raster);
            app.has_ink.set(app.session.has_ink());
            render_preview(app, preview_ref);
        }
        Err(e) => log::error!("failed to snapshot drawing: {}", e),
    }
}

/// Paint the canonical 28x28 image onto the preview canvas, magnified with
/// nearest-neighbor blocks so individual pixels stay visible.
fn render_preview(app: &AppState, preview_ref: &NodeRef) {
    let Some((_, ctx)) = canvas_and_context(preview_ref) else {
        return;
    };

    let canonical = app.session.canonical();
    let (side, rgba) = processing::preview_rgba(&canonical, PREVIEW_SCALE);
    match ImageData::new_with_u8_clamped_array_and_sh(Clamped(&rgba), side, side) {
        Ok(image) => {
            let _ = ctx.put_image_data(&image, 0.0, 0.0);
        }
        Err(_) => log::error!("failed to build preview image"),
    }
}

/// Main application component
#[component]
fn App() -> View {
    let app = AppState::new();
    let draw_ref = create_node_ref();
    let preview_ref = create_node_ref();
    let is_drawing = create_signal(false);
    let surface_ready = create_signal(false);

    // Train both classifiers once the page is up. Training is synchronous
    // CPU work; the spawned task lets the first frame paint the training
    // indicator before it starts.
    {
        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match processing::train_classifier_pair() {
                Ok((digits, letters)) => {
                    app.digit_classifier.set(digits);
                    app.letter_classifier.set(letters);
                    app.status.set(TrainingStatus::Ready);
                    log::info!("classifiers trained");
                }
                Err(e) => {
                    log::error!("training failed: {}", e);
                    app.status.set(TrainingStatus::Error(e));
                }
            }
        });
    }

    let start_drawing = move |ev: web_sys::MouseEvent| {
        let Some((_, ctx)) = canvas_and_context(&draw_ref) else {
            return;
        };
        if !surface_ready.get() {
            reset_surface(&ctx);
            surface_ready.set(true);
        }
        is_drawing.set(true);
        ctx.begin_path();
        ctx.move_to(ev.offset_x() as f64, ev.offset_y() as f64);
    };

    let draw = {
        let app = app.clone();
        move |ev: web_sys::MouseEvent| {
            if !is_drawing.get() {
                return;
            }
            let Some((_, ctx)) = canvas_and_context(&draw_ref) else {
                return;
            };
            ctx.line_to(ev.offset_x() as f64, ev.offset_y() as f64);
            ctx.stroke();

            sync_drawing(&app, &draw_ref, &preview_ref);
        }
    };

    let stop_drawing = move |_: web_sys::MouseEvent| {
        if !is_drawing.get() {
            return;
        }
        is_drawing.set(false);
        if let Some((_, ctx)) = canvas_and_context(&draw_ref) {
            ctx.begin_path();
        }
    };

    let clear_canvas = {
        let app = app.clone();
        move |_: web_sys::MouseEvent| {
            if let Some((_, ctx)) = canvas_and_context(&draw_ref) {
                reset_surface(&ctx);
                surface_ready.set(true);
            }
            app.session.clear();
            app.predictions.set(Vec::new());
            app.has_ink.set(false);
            render_preview(&app, &preview_ref);
        }
    };

    let predict = {
        let app = app.clone();
        move |_: web_sys::MouseEvent| {
            if !app.is_ready() || app.is_predicting.get() || !app.has_ink.get() {
                return;
            }

            let classifier = app.active_classifier();
            let ticket = app.session.begin_prediction();
            app.is_predicting.set(true);

            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = classifier.predict(&ticket.features);
                app.is_predicting.set(false);

                match outcome {
                    // A completed request only displays if no newer result
                    // got there first; a stale one is simply superseded.
                    Some(Ok(ranked)) => {
                        if app.session.accept_result(&ticket) {
                            app.predictions.set(ranked);
                        }
                    }
                    Some(Err(e)) => log::error!("prediction failed: {}", e),
                    None => log::warn!("prediction requested before training finished"),
                }
            });
        }
    };

    let digit_mode = {
        let app = app.clone();
        move |_: web_sys::MouseEvent| app.set_mode(GlyphMode::Digits)
    };
    let letter_mode = {
        let app = app.clone();
        move |_: web_sys::MouseEvent| app.set_mode(GlyphMode::Letters)
    };

    let app_view = app.clone();
    let app_status = app.clone();
    let app_results = app.clone();

    view! {
        div(class="app") {
            header(class="app-header") {
                div {
                    h1 { "Scribble" }
                    span(class="subtitle") { "Handwritten Glyph Classifier" }
                }
                span(class="header-note") {
                    "Models train locally in your browser on synthetic samples"
                }
            }

            main(class="main-content") {
                div(class="controls-panel") {
                    div(class="mode-selector") {
                        button(
                            class=move || mode_button_class(app_view.mode.get(), GlyphMode::Digits),
                            on:click=digit_mode,
                        ) { "Digits 0-9" }
                        button(
                            class=move || mode_button_class(app_view.mode.get(), GlyphMode::Letters),
                            on:click=letter_mode,
                        ) { "Letters A-Z" }
                    }

                    div(class="preview-section") {
                        span(class="section-title") { "Preview (28x28)" }
                        canvas(
                            r#ref=preview_ref,
                            width="140",
                            height="140",
                            class="preview-canvas",
                        )
                    }
                }

                div(class="drawing-panel") {
                    span(class="section-title") { "Draw" }
                    canvas(
                        r#ref=draw_ref,
                        width="280",
                        height="280",
                        class="draw-surface",
                        on:mousedown=start_drawing,
                        on:mousemove=draw,
                        on:mouseup=stop_drawing,
                        on:mouseleave=stop_drawing,
                    )
                    div(class="canvas-actions") {
                        button(class="action-button", on:click=clear_canvas) { "Clear" }
                        button(class="action-button primary", on:click=predict) {
                            (if app.is_predicting.get() {
                                "Analyzing...".to_string()
                            } else {
                                match app.mode.get() {
                                    GlyphMode::Digits => "Predict Digit".to_string(),
                                    GlyphMode::Letters => "Predict Letter".to_string(),
                                }
                            })
                        }
                    }
                }

                div(class="results-panel") {
                    span(class="section-title") { "Results" }
                    (results_view(&app_results))
                }
            }

            div(class="status-bar") {
                span(class="status-message") {
                    (match app_status.status.get_clone() {
                        TrainingStatus::Training => "Training models...".to_string(),
                        TrainingStatus::Ready => "Ready".to_string(),
                        TrainingStatus::Error(e) => format!("Training failed: {}", e),
                    })
                }
                span(class="version-note") { "Scribble v0.1.0" }
            }
        }
    }
}

fn mode_button_class(current: GlyphMode, target: GlyphMode) -> &'static str {
    if current == target {
        "mode-button active"
    } else {
        "mode-button"
    }
}

/// Ranked prediction list: top guess large, next three below it.
fn results_view(app: &AppState) -> View {
    let predictions = app.predictions.get_clone();

    if predictions.is_empty() {
        return view! {
            p(class="results-hint") { "Draw a glyph and press Predict" }
        };
    }

    let top = predictions[0].clone();
    let runner_items: Vec<View> = predictions
        .iter()
        .skip(1)
        .take(3)
        .map(|p| {
            let text = format!("{}  {:.1}%", p.label, p.confidence * 100.0);
            view! { li(class="runner-up") { (text) } }
        })
        .collect();

    view! {
        div(class="top-result") {
            span(class="top-label") { (top.label.to_string()) }
            span(class="top-confidence") { (format!("{:.1}%", top.confidence * 100.0)) }
        }
        ul(class="runners-up") { (runner_items) }
    }
}
