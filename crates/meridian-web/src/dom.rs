use meridian_core::{City, LabelPlacement};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// The city-label overlay: one absolutely positioned element per city,
/// repositioned every frame from the engine's placement records and torn
/// down with the engine. The engine itself never touches the DOM.
pub struct LabelOverlay {
    elements: Vec<web::HtmlElement>,
}

impl LabelOverlay {
    /// Create one label element per city inside the canvas' parent.
    pub fn create(
        document: &web::Document,
        canvas: &web::HtmlCanvasElement,
        cities: &[City],
    ) -> Self {
        let mut elements = Vec::with_capacity(cities.len());
        let parent = canvas.parent_element();
        for city in cities {
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            let Ok(el) = el.dyn_into::<web::HtmlElement>() else {
                continue;
            };
            el.set_class_name("globe-label");
            el.set_text_content(Some(&city.name));
            let _ = el.style().set_property("position", "absolute");
            let _ = el.style().set_property("pointer-events", "none");
            let _ = el.style().set_property("display", "none");
            if let Some(p) = &parent {
                let _ = p.append_child(&el);
            }
            elements.push(el);
        }
        Self { elements }
    }

    /// Reflect this frame's placements onto the overlay. The backing store
    /// is device pixels while CSS positions are logical, so the device
    /// pixel ratio is divided back out.
    pub fn update(&self, placements: &[LabelPlacement]) {
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0) as f32;
        for placement in placements {
            let Some(el) = self.elements.get(placement.city) else {
                continue;
            };
            if placement.visible {
                let _ = el.style().set_property("display", "block");
                let _ = el
                    .style()
                    .set_property("left", &format!("{}px", placement.x / dpr));
                let _ = el
                    .style()
                    .set_property("top", &format!("{}px", placement.y / dpr));
            } else {
                let _ = el.style().set_property("display", "none");
            }
        }
    }

    /// Remove every label element. Safe to call more than once.
    pub fn remove(&mut self) {
        for el in self.elements.drain(..) {
            el.remove();
        }
    }
}
