//! Application layer for couple-quest
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ServiceParams;
pub use ports::{
    activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger},
    couple_repository::CoupleRepository,
    daily_question_repository::DailyQuestionRepository,
    message_repository::MessageRepository,
    profile_repository::ProfileRepository,
    question_catalog::QuestionCatalog,
    quiz_repository::QuizRepository,
    repositories::Repositories,
    response_repository::ResponseRepository,
    store_error::{StoreError, UniqueKey},
    store_flush::{NoStoreFlush, StoreFlush},
};
pub use use_cases::browse_questions::{
    BrowseFilter, BrowseQuestionsError, BrowseQuestionsUseCase,
};
pub use use_cases::chat::{ChatError, ChatUseCase};
pub use use_cases::couples::{CoupleError, CoupleUseCase, CoupleView, CreatedCouple};
pub use use_cases::leaderboard::{
    LEADERBOARD_SIZE, LeaderboardEntry, LeaderboardError, LeaderboardUseCase,
};
pub use use_cases::profile::{ProfileError, UpdateProfileUseCase};
pub use use_cases::quizzes::{PartnerQuizView, QuizError, QuizUseCase};
pub use use_cases::shared::{ErrorStatus, KeyedLocks};
pub use use_cases::submit_answer::{
    SubmitAnswerError, SubmitAnswerInput, SubmitAnswerOutput, SubmitAnswerUseCase,
};
pub use use_cases::today_question::{
    TodayQuestionError, TodayQuestionUseCase, TodayQuestionView,
};
