use std::cell::{Cell, RefCell};
use std::rc::Rc;

use relwrapped_core::bus::{DEFAULT_BURST, MILESTONE_BURST};
use relwrapped_core::{BurstReason, ConfettiBurst, Signal, SignalBus, SignalKind};

#[test]
fn signals_reach_only_matching_listeners() {
    let bus = SignalBus::new();
    let bursts = Rc::new(RefCell::new(Vec::new()));
    let songs = Rc::new(Cell::new(0));

    let seen = bursts.clone();
    let _confetti = bus.subscribe(SignalKind::Confetti, move |signal| {
        if let Signal::Confetti(burst) = signal {
            seen.borrow_mut().push(*burst);
        }
    });
    let count = songs.clone();
    let _songs = bus.subscribe(SignalKind::PlaySong, move |_| count.set(count.get() + 1));

    assert_eq!(bus.publish(Signal::Confetti(ConfettiBurst::milestone(100))), 1);
    assert_eq!(bus.publish(Signal::PlaySong { index: 2 }), 1);
    assert_eq!(bus.publish(Signal::FocusPhoto { index: 0 }), 0);

    let bursts = bursts.borrow();
    assert_eq!(bursts.len(), 1);
    assert_eq!(bursts[0].count, MILESTONE_BURST);
    assert_eq!(bursts[0].reason, Some(BurstReason::Milestone(100)));
    assert_eq!(songs.get(), 1);
}

#[test]
fn dropping_the_subscription_unsubscribes() {
    let bus = SignalBus::new();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let subscription = bus.subscribe(SignalKind::PlayEasterEgg, move |_| {
        counter.set(counter.get() + 1)
    });
    assert_eq!(bus.listener_count(SignalKind::PlayEasterEgg), 1);
    bus.publish(Signal::PlayEasterEgg);
    drop(subscription);
    assert_eq!(bus.listener_count(SignalKind::PlayEasterEgg), 0);
    assert_eq!(bus.publish(Signal::PlayEasterEgg), 0);
    assert_eq!(hits.get(), 1);
}

#[test]
fn subscription_outliving_bus_is_harmless() {
    let bus = SignalBus::new();
    let subscription = bus.subscribe(SignalKind::Confetti, |_| {});
    drop(bus);
    subscription.cancel();
}

#[test]
fn handlers_may_publish_and_subscribe_reentrantly() {
    let bus = SignalBus::new();
    let late_hits = Rc::new(Cell::new(0));
    let held = Rc::new(RefCell::new(Vec::new()));

    let relay_bus = bus.clone();
    let _relay = bus.subscribe(SignalKind::PlayEasterEgg, move |_| {
        relay_bus.publish(Signal::Confetti(ConfettiBurst::default()));
    });

    let join_bus = bus.clone();
    let join_hits = late_hits.clone();
    let join_held = held.clone();
    let _joiner = bus.subscribe(SignalKind::Confetti, move |_| {
        let hits = join_hits.clone();
        let late = join_bus.subscribe(SignalKind::Confetti, move |_| hits.set(hits.get() + 1));
        join_held.borrow_mut().push(late);
    });

    assert_eq!(bus.publish(Signal::PlayEasterEgg), 1);
    assert_eq!(late_hits.get(), 0);
    assert_eq!(bus.listener_count(SignalKind::Confetti), 2);

    bus.publish(Signal::Confetti(ConfettiBurst::default()));
    assert_eq!(late_hits.get(), 1);
}

#[test]
fn default_burst_has_no_reason() {
    let burst = ConfettiBurst::default();
    assert_eq!(burst.count, DEFAULT_BURST);
    assert_eq!(burst.reason, None);
}
