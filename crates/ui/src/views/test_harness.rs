use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Question, QuestionId};
use services::QuizService;
use storage::repository::{InMemoryRepository, QuestionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView};

#[derive(Clone)]
struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        "Cybersecurity MCQ Test".to_string()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
    view_slot: ViewSlot,
}

/// Lets a test swap the view props of a mounted harness.
#[derive(Clone, Default)]
pub struct ViewSlot(Rc<RefCell<Option<Signal<ViewKind>>>>);

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_signal(|| props.view.clone());
    *props.view_slot.0.borrow_mut() = Some(view);
    use_context_provider(|| view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(count) => rsx! { QuizView { count } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: Option<QuizTestHandles>,
    view_slot: ViewSlot,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn set_view(&mut self, kind: ViewKind) {
        let mut view = (*self.view_slot.0.borrow()).expect("harness mounted");
        self.dom.in_runtime(|| view.set(kind));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn build_question(id: u64) -> Question {
    Question::from_pairs(
        QuestionId::new(id),
        format!("Sample question {id}?"),
        [("A", "First"), ("B", "Second"), ("C", "Third"), ("D", "Fourth")],
        "B",
    )
    .expect("valid question")
}

/// Harness over an in-memory bank of `questions` generated questions.
pub fn setup_view_harness(view: ViewKind, questions: u64) -> ViewHarness {
    let storage = Storage::from_repository(InMemoryRepository::with_questions(
        (1..=questions).map(build_question),
    ));
    setup_view_harness_with_repo(view, Arc::clone(&storage.questions))
}

pub fn setup_view_harness_with_repo(
    view: ViewKind,
    questions: Arc<dyn QuestionRepository>,
) -> ViewHarness {
    let quiz = Arc::new(QuizService::new(questions));
    let quiz_handles = match view {
        ViewKind::Quiz(_) => Some(QuizTestHandles::default()),
        ViewKind::Home => None,
    };

    let view_slot = ViewSlot::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz }),
            view,
            quiz_handles: quiz_handles.clone(),
            view_slot: view_slot.clone(),
        },
    );

    ViewHarness {
        dom,
        quiz_handles,
        view_slot,
    }
}
