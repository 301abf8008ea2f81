use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use meridian_core::{GlobeEngine, RunHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, LabelOverlay};
use crate::render;

/// Everything one animation frame touches. Owned by the RAF closure via
/// `Rc<RefCell<..>>`; the `LoopHandle` shares the same cell so teardown can
/// reach in from outside the loop.
pub struct FrameContext {
    pub engine: Rc<RefCell<GlobeEngine>>,
    pub run: RunHandle,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    pub overlay: LabelOverlay,
    pub last_instant: Instant,
    pub raf_id: Option<i32>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // the canvas may have been resized by CSS since last frame
        let width = self.canvas.width();
        let height = self.canvas.height();

        let mut engine = self.engine.borrow_mut();
        engine.resize(width, height);
        engine.tick(dt);

        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(width, height);
            if let Err(e) = gpu.render(&engine) {
                log::error!("render error: {:?}", e);
            }
        }
        self.overlay.update(engine.labels());
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    engine: &GlobeEngine,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, engine).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("WebGPU unavailable, globe stays static: {:?}", e);
            None
        }
    }
}

/// Handle returned by `start_loop`. Stopping cancels the pending frame
/// request, stops the engine, removes the overlay elements, and releases
/// the GPU state. Calling it again is a no-op.
#[derive(Clone)]
pub struct LoopHandle {
    ctx: Rc<RefCell<FrameContext>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        let mut ctx = self.ctx.borrow_mut();
        let run = ctx.run;
        ctx.engine.borrow_mut().stop(&run);
        if let Some(id) = ctx.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        ctx.overlay.remove();
        ctx.gpu = None;
    }
}

/// Drive the frame context from requestAnimationFrame until stopped. The
/// closure re-requests itself only while the engine reports running, so a
/// callback that was already queued when `stop` ran finds the running flag
/// down and does nothing.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let running = frame_ctx_tick.borrow().engine.borrow().is_running();
        if !running {
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                frame_ctx_tick.borrow_mut().raf_id = Some(id);
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            frame_ctx.borrow_mut().raf_id = Some(id);
        }
    }
    LoopHandle { ctx: frame_ctx }
}

/// Keep the canvas backing size synced to its CSS size across window
/// resizes.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
