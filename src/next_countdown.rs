use chrono::NaiveDateTime;
use relwrapped_core::bus::ConfettiBurst;
use relwrapped_core::calendar::{ics_uid, CalendarEntry};
use relwrapped_core::countdown::TICK_MS;
use relwrapped_core::{format_remaining, Countdown, CountdownPhase, EventKind, ScheduledEvent, Signal};
use yew::prelude::*;

use crate::clock;
use crate::hooks::{use_publish, use_wall_clock};

#[derive(Properties, PartialEq)]
pub(crate) struct NextCountdownProps {
    pub event: ScheduledEvent,
}

#[derive(Clone, PartialEq)]
struct CalendarLinks {
    google: Option<String>,
    ics_href: String,
}

fn calendar_links(kind: EventKind, target: NaiveDateTime) -> CalendarLinks {
    let entry = CalendarEntry::for_event(kind, target.date(), clock::local_to_utc(target));
    let ics = entry.to_ics(&ics_uid(clock::now_ms() as i64), clock::now_utc());
    let encoded = String::from(js_sys::encode_uri_component(&ics));
    CalendarLinks {
        google: entry.google_url(),
        ics_href: format!("data:text/calendar;charset=utf8,{encoded}"),
    }
}

#[function_component(NextCountdown)]
pub(crate) fn next_countdown(props: &NextCountdownProps) -> Html {
    let event = props.event;
    let now = use_wall_clock(TICK_MS);
    let countdown = use_mut_ref(|| Countdown::new(event.target));
    let reached = use_state(|| false);
    let publish = use_publish();
    let links = use_memo((event.kind, event.target), |(kind, target)| {
        calendar_links(*kind, *target)
    });

    {
        let countdown = countdown.clone();
        let reached = reached.clone();
        use_effect_with(event.target, move |target| {
            *countdown.borrow_mut() = Countdown::new(*target);
            reached.set(false);
            || ()
        });
    }
    {
        let countdown = countdown.clone();
        let reached = reached.clone();
        use_effect_with(now, move |now| {
            let tick = countdown.borrow_mut().tick(*now);
            if tick.just_reached {
                gloo::console::log!("countdown reached", event.kind.label());
                reached.set(true);
                publish.emit(Signal::Confetti(ConfettiBurst::event_reached(event.kind)));
            }
            || ()
        });
    }

    let remaining = format_remaining(countdown.borrow().remaining_secs(now));
    let celebrating = countdown.borrow().phase(now) == CountdownPhase::Celebrating;
    let summary = match event.kind {
        EventKind::Monthiversary => html! {
            <>
                <span class="countdown-label">{ "Next Monthiversary:" }</span>
                <span class="countdown-value">{ format!("{remaining} left") }</span>
                <span>{ "💕" }</span>
            </>
        },
        EventKind::Milestone(days) => html! {
            <>
                <span class="countdown-label">{ "Next Milestone:" }</span>
                <span class="countdown-value">{ format!("{days} days — {remaining} left") }</span>
                <span>{ "🎉" }</span>
            </>
        },
    };

    html! {
        <div class="next-countdown">
            <div class="countdown-pill">
                { summary }
                if celebrating {
                    <span class="countdown-heart">{ "❤️" }</span>
                }
            </div>
            <div class="calendar-links">
                if let Some(google) = links.google.clone() {
                    <a href={google} target="_blank" rel="noreferrer">{ "Add to Google Calendar" }</a>
                }
                <a href={links.ics_href.clone()} download="event.ics">{ "Download .ics" }</a>
            </div>
            if *reached {
                <div class="countdown-reached">{ "It's here — celebrate! 🎉" }</div>
            }
        </div>
    }
}
