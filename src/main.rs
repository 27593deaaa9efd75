mod app_router;
mod big_letter;
mod boot;
mod carousel_view;
mod clock;
mod confetti_canvas;
mod days_counter;
mod easter_eggs;
mod frame_loop;
mod hooks;
mod input;
mod loader;
mod lock_until;
mod next_countdown;
mod open_when;
mod parallax_layers;
mod polaroid_gallery;
mod quiz_view;
mod song_player;
mod wrapped_section;
mod yew_app;

use boot::BootPhase;

fn main() {
    console_error_panic_hook::set_once();
    let init = app_router::load_init_config();
    boot::set_phase(BootPhase::Starting, &init.data_path);
    yew::Renderer::<yew_app::App>::with_props(yew_app::AppProps { init }).render();
}
