use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::{error, log};
use relwrapped_core::confetti::{origin_y, ConfettiField, Particle};
use relwrapped_core::{Signal, SignalKind};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::clock;
use crate::frame_loop::FrameLoop;
use crate::hooks::use_signal;
use crate::input::viewport_size;

const PIECE_WIDTH: f64 = 10.0;
const PIECE_HEIGHT: f64 = 6.0;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_particle(context: &CanvasRenderingContext2d, particle: &Particle) {
    context.save();
    context.set_global_alpha(particle.opacity().clamp(0.0, 1.0));
    context.set_fill_style_str(particle.color);
    let _ = context.translate(particle.x, particle.y);
    let _ = context.rotate(particle.tilt);
    let height = PIECE_HEIGHT * particle.wobble.cos().abs().max(0.3);
    context.fill_rect(-PIECE_WIDTH / 2.0, -height / 2.0, PIECE_WIDTH, height);
    context.restore();
}

fn run_field(canvas: &HtmlCanvasElement, field: Rc<RefCell<ConfettiField>>) -> Option<FrameLoop> {
    let Some(context) = context_2d(canvas) else {
        error!("confetti: 2d context unavailable");
        return None;
    };
    let canvas = canvas.clone();
    Some(FrameLoop::start(move |_| {
        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());
        context.clear_rect(0.0, 0.0, width, height);
        let mut field = field.borrow_mut();
        field.step();
        for particle in field.particles() {
            draw_particle(&context, particle);
        }
        !field.is_idle()
    }))
}

/// Full-viewport overlay that plays every confetti burst published on the bus.
#[function_component(ConfettiCanvas)]
pub(crate) fn confetti_canvas() -> Html {
    let canvas = use_node_ref();
    let field = use_mut_ref(|| ConfettiField::new(clock::random_seed()));
    let frames = use_mut_ref(|| None::<FrameLoop>);

    {
        let canvas = canvas.clone();
        use_signal(SignalKind::Confetti, move |signal| {
            let Signal::Confetti(burst) = *signal else {
                return;
            };
            let Some(element) = canvas.cast::<HtmlCanvasElement>() else {
                return;
            };
            let (width, height) = viewport_size();
            if element.width() != width as u32 || element.height() != height as u32 {
                element.set_width(width as u32);
                element.set_height(height as u32);
            }
            let spawned = field
                .borrow_mut()
                .spawn(burst.count, origin_y(&burst), width, height);
            log!(format!("confetti: {spawned} pieces ({:?})", burst.reason));
            let running = frames.borrow().as_ref().is_some_and(FrameLoop::is_running);
            if !running {
                *frames.borrow_mut() = run_field(&element, field.clone());
            }
        });
    }

    html! { <canvas class="confetti-canvas" ref={canvas} aria-hidden="true" /> }
}
