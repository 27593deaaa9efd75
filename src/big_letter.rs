use gloo::timers::callback::Timeout;
use relwrapped_core::gate::{LetterGate, LETTER_ERROR_MS};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const WRONG_PASSWORD_GIF: &str = "https://media.giphy.com/media/3o6gbbuLW76jkt8vIc/giphy.gif";

#[derive(Properties, PartialEq)]
pub(crate) struct BigLetterProps {
    pub letter: AttrValue,
}

#[function_component(BigLetter)]
pub(crate) fn big_letter(props: &BigLetterProps) -> Html {
    let gate = use_mut_ref(LetterGate::default);
    let open = use_state(|| false);
    let input = use_state(String::new);
    let error = use_state(|| false);
    let error_timer = use_mut_ref(|| None::<Timeout>);

    if *open {
        return html! {
            <div class="card big-letter open">
                <h2>{ "A Letter For You" }</h2>
                <div class="letter-body">{ props.letter.clone() }</div>
            </div>
        };
    }

    let on_input = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            let target: HtmlInputElement = event.target_unchecked_into();
            input.set(target.value());
        })
    };
    let on_submit = {
        let input = input.clone();
        let open = open.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if gate.borrow_mut().try_open(&input) {
                error.set(false);
                *error_timer.borrow_mut() = None;
                open.set(true);
            } else {
                error.set(true);
                let error = error.clone();
                *error_timer.borrow_mut() =
                    Some(Timeout::new(LETTER_ERROR_MS, move || error.set(false)));
            }
        })
    };

    html! {
        <div class="card big-letter">
            <div class="letter-title">{ "Secret" }</div>
            <p class="letter-hint">{ "hint password sa phone ko" }</p>
            <form onsubmit={on_submit}>
                <input
                    aria-label="password"
                    placeholder="say the password"
                    value={(*input).clone()}
                    oninput={on_input}
                />
                <button type="submit">{ "Open" }</button>
            </form>
            if *error {
                <div class="letter-error">
                    <div>{ "Wrong password!" }</div>
                    <img src={WRONG_PASSWORD_GIF} alt="cute error" />
                </div>
            }
        </div>
    }
}
