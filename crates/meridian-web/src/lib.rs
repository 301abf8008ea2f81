#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use meridian_core::{GlobeConfig, GlobeEngine};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod render;

thread_local! {
    static LOOP_HANDLE: RefCell<Option<frame::LoopHandle>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("meridian-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the globe down: cancel the pending frame, remove the label
/// overlay, release GPU resources. Exposed to the host page; calling it
/// twice (or before a successful mount) is harmless.
#[wasm_bindgen]
pub fn stop_globe() {
    LOOP_HANDLE.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.stop();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Mount contract: the host supplies the canvas. The globe is
    // decorative, so a missing or zero-sized mount degrades to a logged
    // warning instead of an error surfacing into the host page.
    let Some(canvas_el) = document.get_element_by_id("globe-canvas") else {
        log::warn!("missing #globe-canvas, globe not mounted");
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    frame::wire_canvas_resize(&canvas);
    let width = canvas.width();
    let height = canvas.height();
    if width == 0 || height == 0 {
        log::warn!("globe surface is {width}x{height}, globe not mounted");
        return Ok(());
    }

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let engine = GlobeEngine::new(GlobeConfig::new(width, height))?;
    let mut overlay = dom::LabelOverlay::create(&document, &canvas, engine.cities());

    // No WebGPU means no animation; the engine is simply never started.
    let gpu = frame::init_gpu(&canvas, &engine).await;
    if gpu.is_none() {
        overlay.remove();
        return Ok(());
    }
    let engine = Rc::new(RefCell::new(engine));

    events::wire_pointer_handlers(&canvas, engine.clone());

    let run = engine.borrow_mut().start();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        run,
        canvas,
        gpu,
        overlay,
        last_instant: Instant::now(),
        raf_id: None,
    }));
    let handle = frame::start_loop(frame_ctx);
    LOOP_HANDLE.with(|slot| *slot.borrow_mut() = Some(handle));

    Ok(())
}
