use relwrapped_core::Bounds;
use web_sys::Element;

/// Client-space bounding box of an element, as gallery `Bounds`.
pub(crate) fn element_bounds(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Viewport size in CSS pixels, `(0, 0)` when unavailable.
pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

pub(crate) fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn element_bounds_reads_layout_size() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document");
        let body = document.body().expect("body");
        let element = document.create_element("div").expect("div");
        element
            .set_attribute("style", "position: absolute; left: 10px; top: 20px; width: 200px; height: 100px;")
            .expect("style");
        body.append_child(&element).expect("append");
        let bounds = element_bounds(&element);
        element.remove();
        assert_eq!(bounds.width, 200.0);
        assert_eq!(bounds.height, 100.0);
    }
}
