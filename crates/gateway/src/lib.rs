#![forbid(unsafe_code)]

pub mod api;
pub mod http;

pub use api::{GatewayError, InMemoryGateway, QuizGateway};
pub use http::HttpQuizGateway;
