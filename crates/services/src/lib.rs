#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_service;

pub use app_services::{AppServices, QuestionSource};
pub use error::{AppServicesError, QuizServiceError};
pub use quiz_service::QuizService;
