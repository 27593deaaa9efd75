use std::rc::Rc;

use relwrapped_core::keepsakes::LetterPayload;
use relwrapped_core::{ConfettiBurst, OpenWhenLetter, Signal};
use yew::prelude::*;

use crate::hooks::use_publish;

#[derive(Properties, PartialEq)]
pub(crate) struct OpenWhenProps {
    pub letters: Rc<Vec<OpenWhenLetter>>,
}

/// Floating envelopes; each one opens a modal and pops a little confetti.
#[function_component(OpenWhen)]
pub(crate) fn open_when(props: &OpenWhenProps) -> Html {
    let letters = props.letters.clone();
    let opened = use_state(|| None::<usize>);
    let publish = use_publish();

    let buttons: Html = letters
        .iter()
        .enumerate()
        .map(|(i, letter)| {
            let onclick = {
                let opened = opened.clone();
                let publish = publish.clone();
                Callback::from(move |_: MouseEvent| {
                    opened.set(Some(i));
                    publish.emit(Signal::Confetti(ConfettiBurst::open_when()));
                })
            };
            let style = format!(
                "left: {}; top: {}; background: {};",
                letter.left.to_css(),
                letter.top.to_css(),
                letter.color,
            );
            html! {
                <button key={i} class="open-when-button" style={style} title={letter.label.clone()} {onclick}>
                    { letter.monogram() }
                </button>
            }
        })
        .collect();

    let close = {
        let opened = opened.clone();
        Callback::from(move |_: MouseEvent| opened.set(None))
    };
    let modal = (*opened)
        .and_then(|i| letters.get(i))
        .map(|letter| {
            let body = match letter.payload() {
                LetterPayload::Image(src) => html! { <img src={src.to_string()} alt={letter.label.clone()} /> },
                LetterPayload::Text(text) => html! { <div class="letter-text">{ text.to_string() }</div> },
            };
            html! {
                <div class="modal">
                    <div class="modal-backdrop" onclick={close.clone()} />
                    <div class="card modal-body">
                        <h3>{ letter.label.clone() }</h3>
                        { body }
                        <button onclick={close.clone()}>{ "Close" }</button>
                    </div>
                </div>
            }
        })
        .unwrap_or_default();

    html! {
        <div class="open-when">
            { buttons }
            { modal }
        </div>
    }
}
