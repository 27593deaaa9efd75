use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use relwrapped_core::carousel::{Carousel as CarouselState, LightboxKey, ROTATE_MS};
use relwrapped_core::Photo;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
enum CarouselAction {
    Advance,
    Back,
    Goto(usize),
    Open,
    Close,
    LightboxStep(bool),
    Key(LightboxKey),
}

#[derive(Clone, Copy, PartialEq)]
struct CarouselModel(CarouselState);

impl Reducible for CarouselModel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut carousel = self.0;
        match action {
            CarouselAction::Advance => carousel.advance(),
            CarouselAction::Back => carousel.back(),
            CarouselAction::Goto(index) => carousel.goto(index),
            CarouselAction::Open => carousel.open_lightbox(),
            CarouselAction::Close => carousel.close_lightbox(),
            CarouselAction::LightboxStep(forward) => carousel.lightbox_step(forward),
            CarouselAction::Key(key) => {
                carousel.handle_key(key);
            }
        }
        if carousel == self.0 {
            self
        } else {
            Rc::new(Self(carousel))
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct CarouselProps {
    pub photos: Rc<Vec<Photo>>,
}

#[function_component(Carousel)]
pub(crate) fn carousel(props: &CarouselProps) -> Html {
    let photos = props.photos.clone();
    let model = use_reducer(|| CarouselModel(CarouselState::new(photos.len())));

    {
        let model = model.clone();
        use_effect_with(photos.len(), move |len| {
            let interval = (*len > 0)
                .then(|| Interval::new(ROTATE_MS, move || model.dispatch(CarouselAction::Advance)));
            move || drop(interval)
        });
    }
    {
        let model = model.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if let Some(key) = LightboxKey::from_key(&event.key()) {
                        model.dispatch(CarouselAction::Key(key));
                    }
                })
            });
            move || drop(listener)
        });
    }

    if photos.is_empty() {
        return html! {};
    }

    let state = model.0;
    let action = |action: CarouselAction| {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| model.dispatch(action))
    };
    let current = photos.get(state.index()).map(|photo| photo.src.clone()).unwrap_or_default();
    let dots: Html = (0..photos.len())
        .map(|i| {
            let class = if i == state.index() { "dot active" } else { "dot" };
            html! {
                <button key={i} class={class} aria-label={format!("goto-{i}")} onclick={action(CarouselAction::Goto(i))} />
            }
        })
        .collect();

    html! {
        <>
            <div class="carousel">
                <img
                    key={state.index()}
                    src={current}
                    alt={format!("photo-{}", state.index())}
                    class="carousel-image"
                    onclick={action(CarouselAction::Open)}
                />
                <div class="carousel-dots">{ dots }</div>
                <div class="carousel-nav">
                    <button onclick={action(CarouselAction::Back)}>{ "Prev" }</button>
                    <button onclick={action(CarouselAction::Advance)}>{ "Next" }</button>
                </div>
            </div>
            if let Some(open) = state.lightbox() {
                <div class="lightbox">
                    <img
                        src={photos.get(open).map(|photo| photo.src.clone()).unwrap_or_default()}
                        alt={format!("lightbox-{open}")}
                    />
                    <button class="lightbox-close" onclick={action(CarouselAction::Close)}>{ "Close" }</button>
                    <button class="lightbox-prev" onclick={action(CarouselAction::LightboxStep(false))}>{ "◀" }</button>
                    <button class="lightbox-next" onclick={action(CarouselAction::LightboxStep(true))}>{ "▶" }</button>
                </div>
            }
        </>
    }
}
