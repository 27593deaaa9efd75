use relwrapped_core::countdown::{count_up, COUNT_UP_MS};
use yew::prelude::*;

use crate::frame_loop::FrameLoop;

#[derive(Properties, PartialEq)]
pub(crate) struct DaysCounterProps {
    pub days: u32,
}

#[function_component(DaysCounter)]
pub(crate) fn days_counter(props: &DaysCounterProps) -> Html {
    let shown = use_state(|| 0u32);
    {
        let shown = shown.clone();
        use_effect_with(props.days, move |days| {
            let target = *days;
            let mut started = None;
            let frames = FrameLoop::start(move |timestamp| {
                let start = *started.get_or_insert(timestamp);
                let elapsed = timestamp - start;
                shown.set(count_up(target, elapsed, COUNT_UP_MS));
                elapsed < COUNT_UP_MS
            });
            move || drop(frames)
        });
    }

    html! {
        <div class="days-counter">
            <div class="label">{ "Days together" }</div>
            <div class="value">{ *shown }</div>
        </div>
    }
}
