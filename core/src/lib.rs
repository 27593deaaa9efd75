pub mod bus;
pub mod calendar;
pub mod carousel;
pub mod config;
pub mod confetti;
pub mod countdown;
pub mod gallery;
pub mod gate;
pub mod gesture;
pub mod keepsakes;
pub mod parallax;
pub mod playlist;
pub mod quiz;
pub mod schedule;

pub use bus::{BurstReason, ConfettiBurst, Signal, SignalBus, SignalKind, Subscription};
pub use calendar::CalendarEntry;
pub use config::{
    ConfigError, OpenWhenLetter, Photo, QuizQuestion, RelationshipConfig, ScreenOffset, Song, Trip,
};
pub use countdown::{format_remaining, Countdown, CountdownPhase, Tick};
pub use gallery::{Bounds, FocusToken, Gallery, GalleryItem, Placement, Position};
pub use schedule::{EventKind, MilestoneTracker, Outlook, ScheduledEvent};
