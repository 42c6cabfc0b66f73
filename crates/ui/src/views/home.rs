use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::QuestionCount;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let title = ctx.title().to_string();
    let default_count = QuestionCount::DEFAULT;

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            quiz.available_questions()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            h1 { class: "home-title", "{title}" }
            p { class: "home-lead",
                "Test your knowledge with our comprehensive set of cybersecurity multiple choice questions."
            }
            p { class: "home-hint", "Choose the number of questions you want to attempt:" }
            div { class: "home-actions",
                Link {
                    class: "btn btn-primary",
                    to: Route::Quiz { count: default_count.to_string() },
                    "Take {default_count} Question Test"
                }
                match state {
                    ViewState::Ready(total) if total > 0 => rsx! {
                        Link {
                            class: "btn btn-secondary",
                            to: Route::Quiz { count: total.to_string() },
                            "Take Full Test (all {total} Questions)"
                        }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "home-error", "{err.message()}" }
                    },
                    _ => rsx! {},
                }
            }
            p { class: "home-footer", "Practice well" }
        }
    }
}
