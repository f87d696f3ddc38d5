//! Quiz domain module.
//!
//! - `model`: questions, answers and evaluation results
//! - `gateway`: trait for the server-evaluated quiz endpoints

mod gateway;
mod model;

pub use gateway::QuizGateway;
pub(crate) use model::deserialize_options;
pub use model::{
    AnswerFeedback, DescriptiveAnswer, DescriptiveAnswerResult, DescriptiveQuestion,
    MIN_DESCRIPTIVE_ANSWER_LEN, McqAnswer, McqAnswerResult, McqQuestion, QuizOption,
};
