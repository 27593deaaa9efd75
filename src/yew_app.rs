use std::rc::Rc;

use chrono::Duration;
use gloo::console::{error, log};
use relwrapped_core::countdown::CELEBRATION_MS;
use relwrapped_core::keepsakes::photo_for_trip;
use relwrapped_core::schedule::{outlook_holding, parse_anniversary};
use relwrapped_core::{
    ConfettiBurst, MilestoneTracker, OpenWhenLetter, Photo, QuizQuestion, RelationshipConfig,
    Signal, SignalBus, Song, Trip,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_router::InitConfig;
use crate::big_letter::BigLetter;
use crate::boot::{self, BootPhase};
use crate::carousel_view::Carousel;
use crate::confetti_canvas::ConfettiCanvas;
use crate::days_counter::DaysCounter;
use crate::easter_eggs::EasterEggs;
use crate::hooks::{use_publish, use_wall_clock};
use crate::loader::{self, load_hint};
use crate::lock_until::LockUntil;
use crate::next_countdown::NextCountdown;
use crate::open_when::OpenWhen;
use crate::parallax_layers::Parallax;
use crate::polaroid_gallery::PolaroidGallery;
use crate::quiz_view::Quiz;
use crate::song_player::SongPlayer;
use crate::wrapped_section::WrappedSection;

const OUTLOOK_REFRESH_MS: u32 = 60_000;

#[derive(Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready(Rc<RelationshipConfig>),
    Failed { message: String, hint: String },
}

/// Config split into the shared slices each widget takes as props.
#[derive(PartialEq)]
struct Slices {
    songs: Rc<Vec<Song>>,
    trips: Rc<Vec<Trip>>,
    photos: Rc<Vec<Photo>>,
    letters: Rc<Vec<OpenWhenLetter>>,
    quiz: Rc<Vec<QuizQuestion>>,
}

impl Slices {
    fn from_config(config: &RelationshipConfig) -> Self {
        Self {
            songs: Rc::new(config.songs.clone()),
            trips: Rc::new(config.trips.clone()),
            photos: Rc::new(config.photos.clone()),
            letters: Rc::new(config.open_when.clone()),
            quiz: Rc::new(config.quiz.clone()),
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct AppProps {
    pub init: InitConfig,
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let bus = use_memo((), |_| SignalBus::new());
    let state = use_state(|| LoadState::Loading);

    {
        let state = state.clone();
        use_effect_with(props.init.data_path.clone(), move |path| {
            let path = path.clone();
            boot::set_phase(BootPhase::FetchingData, &path);
            spawn_local(async move {
                match loader::fetch_config(&path).await {
                    Ok(config) => {
                        log!(format!(
                            "config loaded from {path}: {} photos, {} songs, {} milestones",
                            config.photos.len(),
                            config.songs.len(),
                            config.milestones.len(),
                        ));
                        boot::set_phase(BootPhase::Rendering, "");
                        state.set(LoadState::Ready(Rc::new(config)));
                    }
                    Err(err) => {
                        let hint = load_hint(&path);
                        error!(format!("failed to load {path} ({}): {err}", err.code()));
                        boot::fail(&err, &hint);
                        state.set(LoadState::Failed {
                            message: err.to_string(),
                            hint,
                        });
                    }
                }
            });
            || ()
        });
    }

    let body = match &*state {
        LoadState::Loading => html! { <div class="status">{ "Loading…" }</div> },
        LoadState::Failed { message, hint } => html! {
            <div class="status failed">
                <h2>{ "Failed to load data" }</h2>
                <p>{ message.clone() }</p>
                <p class="hint">{ hint.clone() }</p>
            </div>
        },
        LoadState::Ready(config) => html! { <Presentation config={config.clone()} /> },
    };

    html! {
        <ContextProvider<SignalBus> context={(*bus).clone()}>
            <Parallax />
            <ConfettiCanvas />
            <main class="app">{ body }</main>
        </ContextProvider<SignalBus>>
    }
}

#[derive(Properties, PartialEq)]
struct PresentationProps {
    config: Rc<RelationshipConfig>,
}

#[function_component(Presentation)]
fn presentation(props: &PresentationProps) -> Html {
    let config = props.config.clone();
    let publish = use_publish();
    let slices = use_memo(config.clone(), |config| Slices::from_config(config));
    let now = use_wall_clock(OUTLOOK_REFRESH_MS);
    let outlook = use_memo((config.clone(), now), |(config, now)| {
        outlook_holding(
            &config.anniversary,
            &config.milestones,
            *now,
            Duration::milliseconds(CELEBRATION_MS),
        )
    });
    let outlook = *outlook;
    let tracker = use_mut_ref(MilestoneTracker::new);

    {
        let publish = publish.clone();
        use_effect_with((), move |_| {
            boot::ready();
            publish.emit(Signal::Confetti(ConfettiBurst::welcome()));
            || ()
        });
    }
    {
        let publish = publish.clone();
        let milestones = config.milestones.clone();
        let days = outlook.map(|outlook| outlook.days_together);
        use_effect_with(days, move |days| {
            if let Some(days) = *days {
                for milestone in tracker.borrow_mut().observe(days, &milestones) {
                    log!(format!("milestone reached: {milestone} days"));
                    publish.emit(Signal::Confetti(ConfettiBurst::milestone(milestone)));
                }
            }
            || ()
        });
    }

    let days_together = outlook.map(|o| o.days_together).unwrap_or(0);
    let next_event = outlook.and_then(|o| o.next);
    let anniversary = parse_anniversary(&config.anniversary);

    let trips: Html = slices
        .trips
        .iter()
        .enumerate()
        .map(|(i, trip)| {
            let onclick = {
                let publish = publish.clone();
                let trip = trip.clone();
                let photos = slices.photos.clone();
                Callback::from(move |_: MouseEvent| match photo_for_trip(&trip, &photos) {
                    Some(index) => publish.emit(Signal::FocusPhoto { index }),
                    None => log!(format!("no photo matches trip \"{}\"", trip.title)),
                })
            };
            html! {
                <button key={i} class="wrapped-item trip" {onclick}>
                    <strong>{ trip.title.clone() }</strong>
                    if let Some(year) = trip.year {
                        <span class="trip-year">{ format!(" ({year})") }</span>
                    }
                    if !trip.notes.is_empty() {
                        <div class="trip-notes">{ trip.notes.clone() }</div>
                    }
                </button>
            }
        })
        .collect();

    let songs: Html = slices
        .songs
        .iter()
        .enumerate()
        .map(|(index, song)| {
            let onclick = {
                let publish = publish.clone();
                Callback::from(move |_: MouseEvent| publish.emit(Signal::PlaySong { index }))
            };
            html! {
                <button key={index} class="wrapped-item song" {onclick}>
                    <strong>{ song.title.clone() }</strong>
                    <span class="song-artist">{ format!(" — {}", song.artist) }</span>
                </button>
            }
        })
        .collect();

    html! {
        <>
            <header class="card hero">
                <SongPlayer songs={slices.songs.clone()} />
                <h1>{ "Relationship Wrapped" }</h1>
                <p class="subtitle">{ "A little recap of our time together" }</p>
                <DaysCounter days={days_together} />
                if let Some(event) = next_event {
                    <NextCountdown {event} />
                }
            </header>
            <EasterEggs secret_note={AttrValue::from(config.secret_note().to_string())} />
            <div class="grid">
                <WrappedSection title="Trips Taken">{ trips }</WrappedSection>
                <BigLetter letter={AttrValue::from(config.anniversary_letter.clone())} />
                <Quiz questions={slices.quiz.clone()} />
                <WrappedSection title="Songs We Love">{ songs }</WrappedSection>
                <section class="card memories">
                    <h3>{ "Memories" }</h3>
                    <Carousel photos={slices.photos.clone()} />
                </section>
            </div>
            <OpenWhen letters={slices.letters.clone()} />
            <PolaroidGallery photos={slices.photos.clone()} />
            if let Some(anniversary) = anniversary {
                <LockUntil {anniversary} />
            }
        </>
    }
}
