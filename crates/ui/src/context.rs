use std::sync::Arc;

use services::QuizService;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;
    fn quiz(&self) -> Arc<QuizService>;
}

#[derive(Clone)]
pub struct AppContext {
    title: String,
    quiz: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            quiz: app.quiz(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
