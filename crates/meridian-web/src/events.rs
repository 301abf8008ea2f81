use std::cell::RefCell;
use std::rc::Rc;

use meridian_core::GlobeEngine;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in the canvas' backing-store pixel space. CSS and
/// backing sizes differ by the device pixel ratio, so the client offset is
/// rescaled before it reaches the engine.
#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    (sx, sy)
}

/// Wire pointer-move and click onto the engine. Both handlers only write
/// interaction state (the parallax target and the deformation impulse);
/// they never touch geometry or allocate.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<GlobeEngine>>) {
    wire_pointermove(canvas, engine.clone());
    wire_click(canvas, engine);
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<GlobeEngine>>) {
    let canvas_for_move = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (sx, sy) = pointer_canvas_px(&ev, &canvas_for_move);
        engine.borrow_mut().pointer_moved(sx, sy);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<GlobeEngine>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        engine.borrow_mut().clicked();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
