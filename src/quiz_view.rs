use std::rc::Rc;

use gloo::timers::callback::Timeout;
use relwrapped_core::quiz::{AnswerOutcome, QuizState, FAILURE_IMAGE_MS};
use relwrapped_core::QuizQuestion;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct QuizProps {
    pub questions: Rc<Vec<QuizQuestion>>,
}

#[function_component(Quiz)]
pub(crate) fn quiz(props: &QuizProps) -> Html {
    let questions = props.questions.clone();
    let state = use_state(|| QuizState::new(questions.len()));
    let failure_image = use_state(|| None::<String>);
    let failure_timer = use_mut_ref(|| None::<Timeout>);

    let answer = {
        let questions = questions.clone();
        let state = state.clone();
        let failure_image = failure_image.clone();
        let failure_timer = failure_timer.clone();
        Callback::from(move |(question, choice): (usize, usize)| {
            let mut next = (*state).clone();
            let Some(outcome) = next.answer(&questions, question, choice) else {
                return;
            };
            state.set(next);
            if let AnswerOutcome::Wrong {
                failure_image: Some(src),
            } = outcome
            {
                failure_image.set(Some(src));
                let failure_image = failure_image.clone();
                *failure_timer.borrow_mut() =
                    Some(Timeout::new(FAILURE_IMAGE_MS, move || failure_image.set(None)));
            }
        })
    };
    let dismiss = {
        let failure_image = failure_image.clone();
        Callback::from(move |_| {
            failure_image.set(None);
            *failure_timer.borrow_mut() = None;
        })
    };

    let cards: Html = questions
        .iter()
        .enumerate()
        .map(|(qi, question)| {
            let chosen = state.answer_for(qi);
            let options: Html = question
                .options
                .iter()
                .enumerate()
                .map(|(oi, option)| {
                    let picked = chosen.filter(|a| a.choice == oi);
                    let class = match picked {
                        Some(a) if a.correct => "quiz-option correct",
                        Some(_) => "quiz-option wrong",
                        None => "quiz-option",
                    };
                    let mark = match picked {
                        Some(a) if a.correct => "♥",
                        Some(_) => "×",
                        None => "",
                    };
                    let onclick = {
                        let answer = answer.clone();
                        Callback::from(move |_| answer.emit((qi, oi)))
                    };
                    html! {
                        <button key={oi} class={class} {onclick}>
                            <span class="quiz-mark">{ mark }</span>
                            <span class="quiz-text">{ option.clone() }</span>
                            if picked.is_some_and(|a| a.correct) {
                                <div class="quiz-feedback">{ question.right_feedback.clone() }</div>
                            }
                        </button>
                    }
                })
                .collect();
            html! {
                <div key={qi} class="card quiz-card">
                    <div class="quiz-question">{ question.question.clone() }</div>
                    <div class="quiz-options">{ options }</div>
                </div>
            }
        })
        .collect();

    let score = state.score();
    html! {
        <div class="quiz">
            { cards }
            if score.answered > 0 {
                <div class="quiz-score">{ format!("{} / {} right", score.correct, score.total) }</div>
            }
            if let Some(src) = (*failure_image).clone() {
                <div class="modal">
                    <div class="modal-backdrop" onclick={dismiss} />
                    <div class="card modal-body">
                        <img src={src} alt="silly" />
                    </div>
                </div>
            }
        </div>
    }
}
