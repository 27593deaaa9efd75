use gloo::console::log;
use gloo::timers::callback::Timeout;
use relwrapped_core::gate::{format_clock, LockGate, UnlockOutcome, SHAKE_MS};
use relwrapped_core::schedule::next_yearly_anniversary;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::clock;
use crate::hooks::use_wall_clock;

const CLOCK_MS: u32 = 1000;

#[derive(Properties, PartialEq)]
pub(crate) struct LockUntilProps {
    pub anniversary: chrono::NaiveDate,
}

/// Covers the page until the next anniversary midnight. The unlock code only
/// holds until reload.
#[function_component(LockUntil)]
pub(crate) fn lock_until(props: &LockUntilProps) -> Html {
    let anniversary = props.anniversary;
    let gate = use_mut_ref(|| {
        next_yearly_anniversary(anniversary, clock::now_local()).map(LockGate::new)
    });
    let now = use_wall_clock(CLOCK_MS);
    let code = use_state(String::new);
    let message = use_state(|| None::<&'static str>);
    let shaking = use_state(|| false);
    let shake_timer = use_mut_ref(|| None::<Timeout>);

    let locked = gate.borrow().as_ref().is_some_and(|gate| gate.is_locked(now));
    if !locked {
        return html! {};
    }
    let remaining = gate
        .borrow()
        .as_ref()
        .map(|gate| gate.remaining_secs(now))
        .unwrap_or(0);

    let on_input = {
        let code = code.clone();
        Callback::from(move |event: InputEvent| {
            let target: HtmlInputElement = event.target_unchecked_into();
            code.set(target.value());
        })
    };
    let on_submit = {
        let code = code.clone();
        let message = message.clone();
        let shaking = shaking.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(outcome) = gate
                .borrow_mut()
                .as_mut()
                .map(|gate| gate.try_code(&code, clock::now_local()))
            else {
                return;
            };
            message.set(Some(outcome.message()));
            match outcome {
                UnlockOutcome::Unlocked { .. } => {
                    log!(outcome.message());
                    code.set(String::new());
                }
                UnlockOutcome::Rejected => {
                    shaking.set(true);
                    let shaking = shaking.clone();
                    *shake_timer.borrow_mut() =
                        Some(Timeout::new(SHAKE_MS, move || shaking.set(false)));
                }
            }
        })
    };

    html! {
        <div class="lock-overlay">
            <div class={classes!("card", "lock-card", shaking.then_some("shake"))}>
                <h2>{ "Not yet…" }</h2>
                <div class="lock-clock">{ format_clock(remaining) }</div>
                <form onsubmit={on_submit}>
                    <label>
                        { "Type the secret code" }
                        <input placeholder="enter code" value={(*code).clone()} oninput={on_input} />
                    </label>
                    <button type="submit">{ "Try" }</button>
                </form>
                if let Some(text) = *message {
                    <div class="lock-message">{ text }</div>
                }
            </div>
        </div>
    }
}
