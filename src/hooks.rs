use chrono::NaiveDateTime;
use gloo::timers::callback::Interval;
use relwrapped_core::bus::SignalHandler;
use relwrapped_core::{Signal, SignalBus, SignalKind};
use std::rc::Rc;
use yew::prelude::*;

use crate::clock;

/// Local wall-clock time, refreshed every `period_ms`. The interval is
/// dropped with the component.
#[hook]
pub(crate) fn use_wall_clock(period_ms: u32) -> NaiveDateTime {
    let now = use_state(clock::now_local);
    {
        let now = now.clone();
        use_effect_with(period_ms, move |period| {
            let interval = Interval::new(*period, move || now.set(clock::now_local()));
            move || drop(interval)
        });
    }
    *now
}

/// Listens for one signal kind for as long as the component is mounted.
/// The handler is refreshed every render so it always sees current props.
#[hook]
pub(crate) fn use_signal<F>(kind: SignalKind, handler: F)
where
    F: Fn(&Signal) + 'static,
{
    let bus = use_context::<SignalBus>();
    let latest = use_mut_ref(|| Rc::new(|_: &Signal| {}) as SignalHandler);
    *latest.borrow_mut() = Rc::new(handler);
    use_effect_with((bus, kind), move |(bus, kind)| {
        let subscription = bus.as_ref().map(|bus| {
            bus.subscribe(*kind, move |signal| {
                let handler = latest.borrow().clone();
                handler(signal);
            })
        });
        move || drop(subscription)
    });
}

#[hook]
pub(crate) fn use_publish() -> Callback<Signal> {
    let bus = use_context::<SignalBus>();
    Callback::from(move |signal: Signal| {
        if let Some(bus) = bus.as_ref() {
            bus.publish(signal);
        }
    })
}
