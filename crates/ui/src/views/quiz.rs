use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::QuestionCount;
use services::QuizServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, QuestionVm, QuizIntent, QuizScreen, QuizVm, ResultsVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView(count: String) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();

    let vm = use_signal(QuizVm::loading);

    // Re-runs whenever the `count` prop changes on a mounted view.
    let resource = use_resource(use_reactive!(|count| {
        let quiz = quiz.clone();
        let mut vm = vm;
        let requested = QuestionCount::from_param(Some(count.as_str()));

        async move {
            vm.set(QuizVm::loading());
            match quiz.start_quiz(requested).await {
                Ok(session) => vm.set(QuizVm::new(session)),
                // An empty bank keeps the neutral loading screen.
                Err(QuizServiceError::Empty) => vm.set(QuizVm::loading()),
                Err(err) => {
                    tracing::error!(error = %err, "failed to start quiz");
                    return Err(ViewError::Unknown);
                }
            }
            Ok::<_, ViewError>(())
        }
    }));

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        vm.write().dispatch(intent);
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let screen = vm.read().screen();

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingNotice {}
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => match screen {
                    QuizScreen::Loading => rsx! {
                        LoadingNotice {}
                    },
                    QuizScreen::Question(question) => rsx! {
                        QuestionPanel { question, on_intent: dispatch_intent }
                    },
                    QuizScreen::Results(results) => rsx! {
                        ResultsPanel { results, on_intent: dispatch_intent }
                    },
                },
            }
        }
    }
}

#[component]
fn LoadingNotice() -> Element {
    rsx! {
        div { class: "quiz-loading",
            p { "Loading questions..." }
        }
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-header",
            span { class: "quiz-position", "{question.position_label}" }
            span { class: "quiz-progress-label", "{question.progress_label}" }
        }
        div { class: "quiz-progress",
            div { class: "quiz-progress__bar", style: "width: {question.progress}%" }
        }
        h2 { class: "quiz-question", "{question.text}" }

        div { class: "quiz-options", role: "radiogroup",
            for option in question.options {
                OptionRow { key: "{option.key}", option, on_intent }
            }
        }

        div { class: "quiz-controls",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !question.can_go_back,
                onclick: move |_| on_intent.call(QuizIntent::Previous),
                "Previous"
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !question.can_advance,
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "{question.next_label}"
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Reveal),
                "Reveal Answer"
            }
        }

        if let Some(answer) = question.revealed_answer {
            div { class: "quiz-reveal",
                p { "{answer}" }
            }
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, on_intent: Callback<QuizIntent>) -> Element {
    let id = format!("option-{}", option.key);
    let key = option.key.clone();

    rsx! {
        label { class: "quiz-option", r#for: "{id}",
            input {
                id: "{id}",
                r#type: "radio",
                name: "quiz-answer",
                value: "{option.key}",
                checked: option.selected,
                onchange: move |_| on_intent.call(QuizIntent::Select(key.clone())),
            }
            span { class: "quiz-option__key", "{option.key}." }
            span { class: "quiz-option__text", "{option.text}" }
        }
    }
}

#[component]
fn ResultsPanel(results: ResultsVm, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-results",
            h2 { "Quiz Results" }
            h3 { class: "quiz-results__score", "{results.percentage}%" }
            p { class: "quiz-results__headline", "{results.headline}" }
            div { class: "quiz-progress",
                div { class: "quiz-progress__bar", style: "width: {results.percentage}%" }
            }

            h4 { "Question Summary:" }
            ul { class: "quiz-results__list",
                for row in results.rows {
                    li {
                        class: if row.is_correct { "quiz-outcome quiz-outcome--correct" } else { "quiz-outcome quiz-outcome--incorrect" },
                        "{row.label}"
                    }
                }
            }

            div { class: "quiz-controls",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "Retake Quiz"
                }
                Link { class: "btn btn-primary", to: Route::Home {}, "Return to Home" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}

#[cfg(test)]
impl PartialEq for QuizTestHandles {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dispatch, &other.dispatch)
    }
}
