use yew::prelude::*;

use crate::hooks::use_publish;
use relwrapped_core::Signal;

#[derive(Properties, PartialEq)]
pub(crate) struct EasterEggsProps {
    pub secret_note: AttrValue,
}

#[function_component(EasterEggs)]
pub(crate) fn easter_eggs(props: &EasterEggsProps) -> Html {
    let note_open = use_state(|| false);
    let publish = use_publish();

    let on_star = Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        publish.emit(Signal::PlayEasterEgg);
    });
    let on_bear = {
        let note_open = note_open.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            note_open.set(true);
        })
    };
    let on_close = {
        let note_open = note_open.clone();
        Callback::from(move |_: MouseEvent| note_open.set(false))
    };

    html! {
        <>
            <button class="egg egg-star" aria-label="star" onclick={on_star}>{ "⭐" }</button>
            <button class="egg egg-bear" aria-label="bear" onclick={on_bear}>{ "🧸" }</button>
            if *note_open {
                <div class="modal">
                    <div class="modal-backdrop" onclick={on_close.clone()} />
                    <div class="card modal-body">
                        <h3>{ "A secret note" }</h3>
                        <p>{ props.secret_note.clone() }</p>
                        <button onclick={on_close}>{ "Close" }</button>
                    </div>
                </div>
            }
        </>
    }
}
