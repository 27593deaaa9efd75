use gloo::events::EventListener;
use relwrapped_core::parallax::{layer_transform, LAYER_SPEEDS};
use yew::prelude::*;

use crate::input::scroll_y;

/// Decorative background layers that drift at different speeds on scroll.
#[function_component(Parallax)]
pub(crate) fn parallax() -> Html {
    let scroll = use_state(scroll_y);

    {
        let scroll = scroll.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                // gloo listeners are passive by default.
                EventListener::new(&window, "scroll", move |_| scroll.set(scroll_y()))
            });
            move || drop(listener)
        });
    }

    let layers: Html = LAYER_SPEEDS
        .iter()
        .enumerate()
        .map(|(i, speed)| {
            let style = format!("transform: {};", layer_transform(*scroll, *speed));
            html! { <div key={i} class={format!("parallax-layer layer-{i}")} style={style} /> }
        })
        .collect();

    html! { <div class="parallax" aria-hidden="true">{ layers }</div> }
}
