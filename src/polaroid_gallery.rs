use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::{log, warn};
use gloo::timers::callback::Timeout;
use relwrapped_core::gallery::{FOCUS_HOLD_MS, PLACEHOLDER_IMAGE_SRC};
use relwrapped_core::gesture::ClickGesture;
use relwrapped_core::{Gallery, Photo, Signal, SignalKind};
use web_sys::{Element, HtmlImageElement};
use yew::prelude::*;

use crate::clock;
use crate::hooks::use_signal;
use crate::input::element_bounds;

const FALLBACK_ATTR: &str = "data-fallback";

/// Pointer press on one photo, tracked until release.
struct Drag {
    id: usize,
    pointer_id: i32,
    origin: (f64, f64),
    offset: (f64, f64),
    gesture: ClickGesture,
}

#[derive(Properties, PartialEq)]
pub(crate) struct PolaroidGalleryProps {
    pub photos: Rc<Vec<Photo>>,
}

#[function_component(PolaroidGallery)]
pub(crate) fn polaroid_gallery(props: &PolaroidGalleryProps) -> Html {
    let photos = props.photos.clone();
    let gallery = use_mut_ref(|| Gallery::new(photos.len(), clock::random_seed()));
    let drag = use_mut_ref(|| None::<Drag>);
    let focus_timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);
    let container = use_node_ref();
    let redraw = use_force_update();

    {
        let gallery = gallery.clone();
        let redraw = redraw.clone();
        use_signal(SignalKind::FocusPhoto, move |signal| {
            let Signal::FocusPhoto { index } = *signal else {
                return;
            };
            let Some(token) = gallery.borrow_mut().focus(index) else {
                warn!(format!("focus request for missing photo {index}"));
                return;
            };
            log!(format!("focusing photo {index}"));
            let gallery = gallery.clone();
            let redraw_later = redraw.clone();
            *focus_timer.borrow_mut() = Some(Timeout::new(FOCUS_HOLD_MS, move || {
                if gallery.borrow_mut().release_focus(token) {
                    redraw_later.force_update();
                }
            }));
            redraw.force_update();
        });
    }

    let on_down = {
        let gallery = gallery.clone();
        let drag = drag.clone();
        let redraw = redraw.clone();
        move |id: usize| {
            let gallery = gallery.clone();
            let drag = drag.clone();
            let redraw = redraw.clone();
            Callback::from(move |event: PointerEvent| {
                event.prevent_default();
                let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
                if let Some(target) = event.target_dyn_into::<Element>() {
                    let _ = target.set_pointer_capture(event.pointer_id());
                }
                *drag.borrow_mut() = Some(Drag {
                    id,
                    pointer_id: event.pointer_id(),
                    origin: (x, y),
                    offset: (0.0, 0.0),
                    gesture: ClickGesture::start(x, y, clock::now_ms()),
                });
                gallery.borrow_mut().begin_drag(id);
                redraw.force_update();
            })
        }
    };

    let on_move = {
        let drag = drag.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: PointerEvent| {
            let mut slot = drag.borrow_mut();
            let Some(active) = slot.as_mut() else {
                return;
            };
            if active.pointer_id != event.pointer_id() {
                return;
            }
            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
            if active.gesture.update(x, y) {
                active.offset = (x - active.origin.0, y - active.origin.1);
                drop(slot);
                redraw.force_update();
            }
        })
    };

    let on_up = {
        let gallery = gallery.clone();
        let drag = drag.clone();
        let container = container.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(active) = drag.borrow_mut().take() else {
                return;
            };
            if active.pointer_id != event.pointer_id() {
                *drag.borrow_mut() = Some(active);
                return;
            }
            let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
            let mut gallery = gallery.borrow_mut();
            if active.gesture.is_click(clock::now_ms()) {
                gallery.click(active.id);
            } else if let Some(element) = container.cast::<Element>() {
                gallery.end_drag(active.id, pointer, element_bounds(&element));
            }
            drop(gallery);
            redraw.force_update();
        })
    };

    let on_cancel = {
        let drag = drag.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: PointerEvent| {
            if drag.borrow_mut().take().is_some() {
                redraw.force_update();
            }
        })
    };

    let on_image_error = Callback::from(|event: Event| {
        let Some(image) = event.target_dyn_into::<HtmlImageElement>() else {
            return;
        };
        if image.has_attribute(FALLBACK_ATTR) {
            return;
        }
        warn!(format!("photo failed to load: {}", image.src()));
        let _ = image.set_attribute(FALLBACK_ATTR, "1");
        image.set_src(PLACEHOLDER_IMAGE_SRC);
    });

    let gallery_ref = gallery.borrow();
    let drag_ref = drag.borrow();
    let cards: Html = photos
        .iter()
        .enumerate()
        .filter_map(|(id, photo)| {
            let placement = gallery_ref.placement(id)?;
            let offset = drag_ref
                .as_ref()
                .filter(|active| active.id == id && !placement.focused)
                .map(|active| active.offset)
                .unwrap_or((0.0, 0.0));
            let style = format!(
                "left: {:.3}%; top: {:.3}%; z-index: {}; transform: translate(-50%, -50%) translate({}px, {}px) rotate({:.2}deg) scale({});",
                placement.left,
                placement.top,
                placement.z_index,
                offset.0,
                offset.1,
                placement.rotation_deg,
                placement.scale,
            );
            let class = classes!(
                "polaroid",
                placement.flipped.then_some("flipped"),
                placement.focused.then_some("focused"),
            );
            Some(html! {
                <div
                    key={id}
                    class={class}
                    style={style}
                    onpointerdown={on_down(id)}
                    onpointermove={on_move.clone()}
                    onpointerup={on_up.clone()}
                    onpointercancel={on_cancel.clone()}
                >
                    if placement.flipped {
                        <div class="polaroid-back">{ photo.back_text().to_string() }</div>
                    } else {
                        <img
                            src={photo.src.clone()}
                            alt={photo.display_caption(id)}
                            draggable="false"
                            onerror={on_image_error.clone()}
                        />
                        <div class="polaroid-caption">{ photo.display_caption(id) }</div>
                        if let Some(name) = photo.name_line() {
                            <div class="polaroid-name">{ name.to_string() }</div>
                        }
                    }
                </div>
            })
        })
        .collect();

    html! {
        <div class="polaroid-gallery" ref={container}>
            <div class="polaroid-hint">{ "Click or drag photos" }</div>
            { cards }
        </div>
    }
}
