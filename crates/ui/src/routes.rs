use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz?:count", QuizView)] Quiz { count: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
