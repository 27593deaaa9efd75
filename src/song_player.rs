use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use relwrapped_core::playlist::{
    background_for, spectrum_bars, Playlist, ANALYSER_FFT_SIZE, BAR_IDLE_HEIGHT, VISUALIZER_BARS,
};
use relwrapped_core::{Signal, SignalKind, Song};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AnalyserNode, AudioContext, AudioContextState, HtmlAudioElement, HtmlElement};
use yew::prelude::*;

use crate::frame_loop::FrameLoop;
use crate::hooks::use_signal;

const SPARKLE_MS: u32 = 900;
const BAR_BASELINE: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PlayerAction {
    Next,
    Previous,
    Select(usize),
    Toggle,
    Play,
    Pause,
    Ended,
    Progress { current: f64, duration: f64 },
}

#[derive(Clone, Copy, PartialEq)]
struct PlayerState(Playlist);

impl Reducible for PlayerState {
    type Action = PlayerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut playlist = self.0;
        match action {
            PlayerAction::Next => playlist.next(),
            PlayerAction::Previous => playlist.previous(),
            PlayerAction::Select(index) => {
                playlist.select(index);
            }
            PlayerAction::Toggle => playlist.toggle(),
            PlayerAction::Play => playlist.play(),
            PlayerAction::Pause => playlist.pause(),
            PlayerAction::Ended => playlist.ended(),
            PlayerAction::Progress { current, duration } => {
                playlist.set_progress(current, duration)
            }
        }
        if playlist == self.0 {
            self
        } else {
            Rc::new(Self(playlist))
        }
    }
}

struct AudioGraph {
    context: AudioContext,
    analyser: AnalyserNode,
}

impl AudioGraph {
    fn attach(audio: &HtmlAudioElement) -> Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let source = context.create_media_element_source(audio)?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        source.connect_with_audio_node(&analyser)?;
        analyser.connect_with_audio_node(&context.destination())?;
        Ok(Self { context, analyser })
    }

    fn resume(&self) {
        if self.context.state() != AudioContextState::Suspended {
            return;
        }
        if let Ok(promise) = self.context.resume() {
            spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        }
    }
}

fn set_page_background(index: usize) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let _ = root.style().set_property("--app-bg", background_for(index));
}

fn media_error_label(audio: &HtmlAudioElement) -> String {
    audio
        .error()
        .map(|err| format!("code {} {}", err.code(), err.message()))
        .unwrap_or_else(|| "unknown error".to_string())
}

#[derive(Properties, PartialEq)]
pub(crate) struct SongPlayerProps {
    pub songs: Rc<Vec<Song>>,
}

#[function_component(SongPlayer)]
pub(crate) fn song_player(props: &SongPlayerProps) -> Html {
    let songs = props.songs.clone();
    let player = use_reducer(|| PlayerState(Playlist::new(songs.len())));
    let playlist = player.0;
    let audio_ref = use_node_ref();
    let bars = use_state(|| vec![BAR_IDLE_HEIGHT; VISUALIZER_BARS]);
    let sparkle = use_state(|| false);
    let sparkle_timer = use_mut_ref(|| None::<Timeout>);
    let graph = use_mut_ref(|| None::<AudioGraph>);

    use_effect_with(playlist.index(), |index| {
        set_page_background(*index);
        || ()
    });

    {
        let audio_ref = audio_ref.clone();
        let player = player.clone();
        use_effect_with((), move |_| {
            let listeners = audio_ref.cast::<HtmlAudioElement>().map(|audio| {
                let on_time = {
                    let player = player.clone();
                    let audio_for_time = audio.clone();
                    EventListener::new(&audio, "timeupdate", move |_| {
                        player.dispatch(PlayerAction::Progress {
                            current: audio_for_time.current_time(),
                            duration: audio_for_time.duration(),
                        });
                    })
                };
                let on_end = {
                    let player = player.clone();
                    EventListener::new(&audio, "ended", move |_| {
                        player.dispatch(PlayerAction::Ended);
                    })
                };
                let on_error = {
                    let player = player.clone();
                    let audio_for_error = audio.clone();
                    EventListener::new(&audio, "error", move |_| {
                        gloo::console::error!(
                            "audio element error",
                            audio_for_error.src(),
                            media_error_label(&audio_for_error)
                        );
                        player.dispatch(PlayerAction::Pause);
                    })
                };
                [on_time, on_end, on_error]
            });
            move || drop(listeners)
        });
    }

    {
        let audio_ref = audio_ref.clone();
        let songs = songs.clone();
        use_effect_with(playlist.index(), move |index| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                let src = songs.get(*index).map(|song| song.audio_url.as_str()).unwrap_or("");
                audio.set_src(src);
            }
            || ()
        });
    }

    {
        let audio_ref = audio_ref.clone();
        let player = player.clone();
        use_effect_with((playlist.index(), playlist.is_playing()), move |(_, playing)| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                if *playing {
                    match audio.play() {
                        Ok(promise) => spawn_local(async move {
                            if let Err(err) = JsFuture::from(promise).await {
                                gloo::console::error!("play() failed", err);
                                player.dispatch(PlayerAction::Pause);
                            }
                        }),
                        Err(err) => {
                            gloo::console::error!("play() failed", err);
                            player.dispatch(PlayerAction::Pause);
                        }
                    }
                } else {
                    let _ = audio.pause();
                }
            }
            || ()
        });
    }

    {
        let audio_ref = audio_ref.clone();
        let graph = graph.clone();
        let bars = bars.clone();
        use_effect_with(playlist.is_playing(), move |playing| {
            let mut frames = None;
            if *playing {
                if graph.borrow().is_none() {
                    if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                        match AudioGraph::attach(&audio) {
                            Ok(attached) => *graph.borrow_mut() = Some(attached),
                            Err(err) => gloo::console::warn!("audio visualizer unavailable", err),
                        }
                    }
                }
                if let Some(attached) = graph.borrow().as_ref() {
                    attached.resume();
                    let analyser = attached.analyser.clone();
                    let mut bins = vec![0u8; analyser.frequency_bin_count() as usize];
                    let bars = bars.clone();
                    frames = Some(FrameLoop::start(move |_| {
                        analyser.get_byte_frequency_data(&mut bins);
                        bars.set(spectrum_bars(&bins, VISUALIZER_BARS));
                        true
                    }));
                }
            } else {
                bars.set(vec![BAR_IDLE_HEIGHT; VISUALIZER_BARS]);
            }
            move || drop(frames)
        });
    }

    {
        let player = player.clone();
        use_signal(SignalKind::PlaySong, move |signal| {
            if let Signal::PlaySong { index } = signal {
                player.dispatch(PlayerAction::Select(*index));
            }
        });
    }
    {
        let player = player.clone();
        let sparkle = sparkle.clone();
        let sparkle_timer = sparkle_timer.clone();
        use_signal(SignalKind::PlayEasterEgg, move |_| {
            player.dispatch(PlayerAction::Play);
            sparkle.set(true);
            let sparkle = sparkle.clone();
            *sparkle_timer.borrow_mut() = Some(Timeout::new(SPARKLE_MS, move || sparkle.set(false)));
        });
    }

    let (title, artist) = playlist
        .current(&songs)
        .map(|song| (song.title.clone(), song.artist.clone()))
        .unwrap_or_else(|| ("—".to_string(), String::new()));
    let on_previous = {
        let player = player.clone();
        Callback::from(move |_| player.dispatch(PlayerAction::Previous))
    };
    let on_toggle = {
        let player = player.clone();
        Callback::from(move |_| player.dispatch(PlayerAction::Toggle))
    };
    let on_next = {
        let player = player.clone();
        Callback::from(move |_| player.dispatch(PlayerAction::Next))
    };
    let bar_rects: Html = bars
        .iter()
        .enumerate()
        .map(|(i, height)| {
            let x = (i as u32) * 7 + 4;
            let y = BAR_BASELINE.saturating_sub(*height);
            html! {
                <rect x={x.to_string()} y={y.to_string()} width="5" height={height.to_string()} rx="2" fill="url(#bar-gradient)" />
            }
        })
        .collect();

    html! {
        <div class="song-player">
            <audio ref={audio_ref} />
            if *sparkle {
                <div class="sparkle show" aria-hidden="true" />
            }
            <div class="song-body">
                <div class="song-heading">{ "Our Song" }</div>
                <div class="song-title">{ format!("{title} — {artist}") }</div>
                <div class="song-visual">
                    <svg width="90" height="44" viewBox="0 0 90 44" aria-hidden="true">
                        { bar_rects }
                        <defs>
                            <linearGradient id="bar-gradient" x1="0" x2="0" y1="0" y2="1">
                                <stop offset="0%" stop-color="#fff" />
                                <stop offset="100%" stop-color="#ffd1dc" />
                            </linearGradient>
                        </defs>
                    </svg>
                    <div class="song-progress">
                        <div class="song-progress-fill" style={format!("width: {:.2}%", playlist.progress_pct())} />
                    </div>
                </div>
                <div class="song-controls">
                    <button onclick={on_previous}>{ "◀" }</button>
                    <button onclick={on_toggle}>{ if playlist.is_playing() { "Pause" } else { "Play" } }</button>
                    <button onclick={on_next}>{ "▶" }</button>
                </div>
            </div>
        </div>
    }
}
