//! In-process mock ports shared by use case tests.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger};
use crate::ports::couple_repository::CoupleRepository;
use crate::ports::daily_question_repository::DailyQuestionRepository;
use crate::ports::message_repository::MessageRepository;
use crate::ports::profile_repository::ProfileRepository;
use crate::ports::question_catalog::QuestionCatalog;
use crate::ports::quiz_repository::QuizRepository;
use crate::ports::repositories::Repositories;
use crate::ports::response_repository::ResponseRepository;
use crate::ports::store_error::{StoreError, UniqueKey};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use couplequest_domain::{
    ConnectionCode, Couple, CoupleId, DailyQuestion, DailyQuestionId, Message, MessageContent,
    MessageId, NewResponse, Profile, ProfileUpdate, Progress, Question, QuestionId,
    QuestionModule, QuizId, QuizResult, QuizSubmission, Response, ResponseId, Reward, UserId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    next_id: u64,
    couples: Vec<Couple>,
    daily: Vec<DailyQuestion>,
    responses: Vec<Response>,
    questions: Vec<Question>,
    profiles: Vec<Profile>,
    messages: Vec<Message>,
    quizzes: Vec<QuizResult>,
}

impl State {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Vec-backed mock of every persistence port.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<State>,
    pub fail_reveal: AtomicBool,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories::from_store(self.clone())
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// A complete couple of `creator` and `partner` with the given progress.
    pub fn paired(&self, creator: &str, partner: &str, progress: Progress) -> Couple {
        let mut s = self.state();
        let id = CoupleId::new(s.next());
        let code = ConnectionCode::parse(&format!("{}", 100_000 + id.get())).unwrap();
        let mut couple = Couple::new(id, UserId::new(creator), code, Utc::now());
        couple.partner = Some(UserId::new(partner));
        couple.progress = progress;
        s.couples.push(couple.clone());
        couple
    }

    /// A couple whose partner slot is still empty.
    pub fn solo(&self, creator: &str) -> Couple {
        let mut s = self.state();
        let id = CoupleId::new(s.next());
        let code = ConnectionCode::parse(&format!("{}", 100_000 + id.get())).unwrap();
        let couple = Couple::new(id, UserId::new(creator), code, Utc::now());
        s.couples.push(couple.clone());
        couple
    }

    pub fn daily_question(&self, couple: CoupleId) -> DailyQuestion {
        let mut s = self.state();
        let id = DailyQuestionId::new(s.next());
        let dq = DailyQuestion::new(
            id,
            couple,
            QuestionId::new(1),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            Utc::now(),
        );
        s.daily.push(dq.clone());
        dq
    }

    pub fn add_question(&self, module: QuestionModule, text: &str) -> Question {
        let mut s = self.state();
        let q = Question {
            id: QuestionId::new(s.next()),
            text: text.to_string(),
            category: "general".to_string(),
            depth: "light".to_string(),
            module,
            occasion: None,
            active: true,
        };
        s.questions.push(q.clone());
        q
    }

    pub fn push_question(&self, question: Question) {
        self.state().questions.push(question);
    }

    pub fn couple(&self, id: CoupleId) -> Couple {
        self.state().couples.iter().find(|c| c.id == id).cloned().unwrap()
    }

    pub fn daily(&self, id: DailyQuestionId) -> DailyQuestion {
        self.state().daily.iter().find(|d| d.id == id).cloned().unwrap()
    }

    pub fn responses_for(&self, id: DailyQuestionId) -> Vec<Response> {
        self.state()
            .responses
            .iter()
            .filter(|r| r.daily_question_id == id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CoupleRepository for MockStore {
    async fn find_by_id(&self, id: CoupleId) -> Result<Option<Couple>, StoreError> {
        Ok(self.state().couples.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_member(&self, user: &UserId) -> Result<Option<Couple>, StoreError> {
        Ok(self.state().couples.iter().find(|c| c.is_member(user)).cloned())
    }

    async fn find_by_code(&self, code: &ConnectionCode) -> Result<Option<Couple>, StoreError> {
        Ok(self
            .state()
            .couples
            .iter()
            .find(|c| &c.connection_code == code)
            .cloned())
    }

    async fn create(&self, creator: &UserId, code: ConnectionCode) -> Result<Couple, StoreError> {
        let mut s = self.state();
        if s.couples.iter().any(|c| c.connection_code == code) {
            return Err(StoreError::Conflict(UniqueKey::ConnectionCode));
        }
        if s.couples.iter().any(|c| c.is_member(creator)) {
            return Err(StoreError::Conflict(UniqueKey::CoupleMembership));
        }
        let couple = Couple::new(CoupleId::new(s.next()), creator.clone(), code, Utc::now());
        s.couples.push(couple.clone());
        Ok(couple)
    }

    async fn set_partner(&self, couple: CoupleId, user: &UserId) -> Result<Couple, StoreError> {
        let mut s = self.state();
        if s.couples.iter().any(|c| c.is_member(user)) {
            return Err(StoreError::Conflict(UniqueKey::CoupleMembership));
        }
        let c = s
            .couples
            .iter_mut()
            .find(|c| c.id == couple)
            .ok_or_else(|| StoreError::not_found("couple", couple))?;
        c.join(user.clone())
            .map_err(|_| StoreError::Conflict(UniqueKey::PartnerSlot))?;
        Ok(c.clone())
    }

    async fn set_anniversary(
        &self,
        couple: CoupleId,
        anniversary: Option<NaiveDate>,
    ) -> Result<Couple, StoreError> {
        let mut s = self.state();
        let c = s
            .couples
            .iter_mut()
            .find(|c| c.id == couple)
            .ok_or_else(|| StoreError::not_found("couple", couple))?;
        c.anniversary = anniversary;
        Ok(c.clone())
    }

    async fn list_all(&self) -> Result<Vec<Couple>, StoreError> {
        let mut all = self.state().couples.clone();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }
}

#[async_trait]
impl DailyQuestionRepository for MockStore {
    async fn find_by_id(&self, id: DailyQuestionId) -> Result<Option<DailyQuestion>, StoreError> {
        Ok(self.state().daily.iter().find(|d| d.id == id).cloned())
    }

    async fn find_for_date(
        &self,
        couple: CoupleId,
        date: NaiveDate,
    ) -> Result<Option<DailyQuestion>, StoreError> {
        Ok(self
            .state()
            .daily
            .iter()
            .find(|d| d.couple_id == couple && d.date == date)
            .cloned())
    }

    async fn get_or_create(
        &self,
        couple: CoupleId,
        question: QuestionId,
        date: NaiveDate,
    ) -> Result<DailyQuestion, StoreError> {
        let mut s = self.state();
        if let Some(existing) = s
            .daily
            .iter()
            .find(|d| d.couple_id == couple && d.date == date)
        {
            return Ok(existing.clone());
        }
        let dq = DailyQuestion::new(
            DailyQuestionId::new(s.next()),
            couple,
            question,
            date,
            Utc::now(),
        );
        s.daily.push(dq.clone());
        Ok(dq)
    }

    async fn reveal(&self, id: DailyQuestionId, award: u64) -> Result<Option<Reward>, StoreError> {
        if self.fail_reveal.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        let mut s = self.state();
        let dq = s
            .daily
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found("daily question", id))?;
        if dq.completed {
            return Ok(None);
        }
        dq.complete(award);
        let couple_id = dq.couple_id;
        for r in s.responses.iter_mut().filter(|r| r.daily_question_id == id) {
            r.is_private = false;
        }
        let couple = s
            .couples
            .iter_mut()
            .find(|c| c.id == couple_id)
            .ok_or_else(|| StoreError::not_found("couple", couple_id))?;
        let reward = couple.progress.reward(award);
        couple.progress = reward.after;
        Ok(Some(reward))
    }
}

#[async_trait]
impl ResponseRepository for MockStore {
    async fn find(
        &self,
        daily_question: DailyQuestionId,
        user: &UserId,
    ) -> Result<Option<Response>, StoreError> {
        Ok(self
            .state()
            .responses
            .iter()
            .find(|r| r.daily_question_id == daily_question && &r.user_id == user)
            .cloned())
    }

    async fn list_for(&self, daily_question: DailyQuestionId) -> Result<Vec<Response>, StoreError> {
        Ok(self.responses_for(daily_question))
    }

    async fn insert(&self, response: NewResponse) -> Result<Response, StoreError> {
        let mut s = self.state();
        if s.responses.iter().any(|r| {
            r.daily_question_id == response.daily_question_id && r.user_id == response.user_id
        }) {
            return Err(StoreError::Conflict(UniqueKey::ResponsePerUser));
        }
        let stored = response.into_response(ResponseId::new(s.next()), Utc::now());
        s.responses.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl QuestionCatalog for MockStore {
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.state().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<Question>, StoreError> {
        let mut all = self.state().questions.clone();
        all.sort_by_key(|q| q.id);
        Ok(all)
    }
}

#[async_trait]
impl ProfileRepository for MockStore {
    async fn find(&self, user: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.state().profiles.iter().find(|p| &p.user_id == user).cloned())
    }

    async fn upsert(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile, StoreError> {
        let mut s = self.state();
        if !s.profiles.iter().any(|p| &p.user_id == user) {
            s.profiles.push(Profile::empty(user.clone()));
        }
        let profile = s
            .profiles
            .iter_mut()
            .find(|p| &p.user_id == user)
            .ok_or_else(|| StoreError::not_found("profile", user))?;
        update.apply_to(profile);
        Ok(profile.clone())
    }
}

#[async_trait]
impl MessageRepository for MockStore {
    async fn append(
        &self,
        couple: CoupleId,
        sender: &UserId,
        content: MessageContent,
    ) -> Result<Message, StoreError> {
        let mut s = self.state();
        let message = Message::new(
            MessageId::new(s.next()),
            couple,
            sender.clone(),
            content,
            Utc::now(),
        );
        s.messages.push(message.clone());
        Ok(message)
    }

    async fn recent(&self, couple: CoupleId, limit: usize) -> Result<Vec<Message>, StoreError> {
        let all: Vec<Message> = self
            .state()
            .messages
            .iter()
            .filter(|m| m.couple_id == couple)
            .cloned()
            .collect();
        let skip = all.len().saturating_sub(limit);
        Ok(all.into_iter().skip(skip).collect())
    }

    async fn mark_read(
        &self,
        couple: CoupleId,
        reader: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        Ok(self
            .state()
            .messages
            .iter_mut()
            .filter(|m| m.couple_id == couple)
            .map(|m| m.mark_read_by(reader, at))
            .filter(|changed| *changed)
            .count())
    }
}

#[async_trait]
impl QuizRepository for MockStore {
    async fn insert(
        &self,
        couple: CoupleId,
        user: &UserId,
        submission: QuizSubmission,
    ) -> Result<QuizResult, StoreError> {
        let mut s = self.state();
        let (quiz_type, results) = submission.into_parts();
        let quiz = QuizResult {
            id: QuizId::new(s.next()),
            user_id: user.clone(),
            couple_id: couple,
            quiz_type,
            results,
            completed_at: Utc::now(),
        };
        s.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn list_for_couple(&self, couple: CoupleId) -> Result<Vec<QuizResult>, StoreError> {
        let mut list: Vec<QuizResult> = self
            .state()
            .quizzes
            .iter()
            .filter(|q| q.couple_id == couple)
            .cloned()
            .collect();
        list.reverse();
        Ok(list)
    }
}

/// Activity logger that keeps event types in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ActivityLogger for RecordingLogger {
    fn log(&self, event: ActivityEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
