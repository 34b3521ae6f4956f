//! Bundle of persistence ports handed to use cases.

use super::couple_repository::CoupleRepository;
use super::daily_question_repository::DailyQuestionRepository;
use super::message_repository::MessageRepository;
use super::profile_repository::ProfileRepository;
use super::question_catalog::QuestionCatalog;
use super::quiz_repository::QuizRepository;
use super::response_repository::ResponseRepository;
use std::sync::Arc;

/// Every persistence port, usually all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub couples: Arc<dyn CoupleRepository>,
    pub daily_questions: Arc<dyn DailyQuestionRepository>,
    pub responses: Arc<dyn ResponseRepository>,
    pub questions: Arc<dyn QuestionCatalog>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Repositories {
    /// Use one store for every port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CoupleRepository
            + DailyQuestionRepository
            + ResponseRepository
            + QuestionCatalog
            + ProfileRepository
            + MessageRepository
            + QuizRepository
            + 'static,
    {
        Self {
            couples: store.clone(),
            daily_questions: store.clone(),
            responses: store.clone(),
            questions: store.clone(),
            profiles: store.clone(),
            messages: store.clone(),
            quizzes: store,
        }
    }
}
