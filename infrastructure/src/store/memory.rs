//! In-memory implementation of the persistence ports.
//!
//! All tables live behind one [`RwLock`], so every port method is a single
//! critical section: uniqueness checks and the writes they guard can never
//! interleave with another request. The reveal validates everything it
//! needs before its first write, which keeps it all-or-nothing.

use super::seed::SeedQuestion;
use super::snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotError, SnapshotFile};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use couplequest_application::ports::couple_repository::CoupleRepository;
use couplequest_application::ports::daily_question_repository::DailyQuestionRepository;
use couplequest_application::ports::message_repository::MessageRepository;
use couplequest_application::ports::profile_repository::ProfileRepository;
use couplequest_application::ports::question_catalog::QuestionCatalog;
use couplequest_application::ports::quiz_repository::QuizRepository;
use couplequest_application::ports::response_repository::ResponseRepository;
use couplequest_application::ports::store_error::{StoreError, UniqueKey};
use couplequest_application::ports::store_flush::StoreFlush;
use couplequest_domain::{
    ConnectionCode, Couple, CoupleId, DailyQuestion, DailyQuestionId, DomainError, Message,
    MessageContent, MessageId, NewResponse, Profile, ProfileUpdate, Question, QuestionId,
    QuizId, QuizResult, QuizSubmission, Response, ResponseId, Reward, UserId,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct Tables {
    couples: BTreeMap<CoupleId, Couple>,
    daily_questions: BTreeMap<DailyQuestionId, DailyQuestion>,
    responses: BTreeMap<ResponseId, Response>,
    questions: BTreeMap<QuestionId, Question>,
    profiles: BTreeMap<UserId, Profile>,
    messages: BTreeMap<MessageId, Message>,
    quizzes: BTreeMap<QuizId, QuizResult>,
}

/// Next sequence number for a table whose rows are never deleted.
fn next_id<K: Ord, V>(table: &BTreeMap<K, V>, raw: impl Fn(&K) -> u64) -> u64 {
    table.last_key_value().map_or(1, |(k, _)| raw(k) + 1)
}

impl Tables {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            couples: snapshot.couples.into_iter().map(|c| (c.id, c)).collect(),
            daily_questions: snapshot
                .daily_questions
                .into_iter()
                .map(|d| (d.id, d))
                .collect(),
            responses: snapshot.responses.into_iter().map(|r| (r.id, r)).collect(),
            questions: snapshot.questions.into_iter().map(|q| (q.id, q)).collect(),
            profiles: snapshot
                .profiles
                .into_iter()
                .map(|p| (p.user_id.clone(), p))
                .collect(),
            messages: snapshot.messages.into_iter().map(|m| (m.id, m)).collect(),
            quizzes: snapshot.quizzes.into_iter().map(|q| (q.id, q)).collect(),
        }
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            couples: self.couples.values().cloned().collect(),
            daily_questions: self.daily_questions.values().cloned().collect(),
            responses: self.responses.values().cloned().collect(),
            questions: self.questions.values().cloned().collect(),
            profiles: self.profiles.values().cloned().collect(),
            messages: self.messages.values().cloned().collect(),
            quizzes: self.quizzes.values().cloned().collect(),
        }
    }

    fn couple_of(&self, user: &UserId) -> Option<&Couple> {
        self.couples.values().find(|c| c.is_member(user))
    }
}

/// Store keeping every table in memory, optionally backed by a snapshot file.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    snapshot: Option<SnapshotFile>,
    /// Serializes flushes so snapshots land on disk in order.
    flush_lock: Mutex<()>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// An empty store without persistence.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot: None,
            flush_lock: Mutex::new(()),
        }
    }

    /// A store holding the contents of `snapshot`, without persistence.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            tables: RwLock::new(Tables::from_snapshot(snapshot)),
            ..Self::new()
        }
    }

    /// A store persisted to `file`, loaded from it when it already exists.
    pub async fn open(file: SnapshotFile) -> Result<Self, SnapshotError> {
        let tables = match file.load().await? {
            Some(snapshot) => Tables::from_snapshot(snapshot),
            None => {
                info!("No snapshot at {}, starting empty", file.path().display());
                Tables::default()
            }
        };
        Ok(Self {
            tables: RwLock::new(tables),
            snapshot: Some(file),
            flush_lock: Mutex::new(()),
        })
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Fill an empty question catalog. Returns how many questions were added.
    ///
    /// A catalog that already has questions (e.g. restored from a snapshot)
    /// is left alone.
    pub async fn seed_questions(&self, seeds: Vec<SeedQuestion>) -> usize {
        let mut t = self.tables.write().await;
        if !t.questions.is_empty() {
            debug!(
                "Question catalog already has {} entries, skipping seed",
                t.questions.len()
            );
            return 0;
        }
        let count = seeds.len();
        for (i, seed) in seeds.into_iter().enumerate() {
            let id = QuestionId::new(i as u64 + 1);
            t.questions.insert(id, seed.into_question(id));
        }
        info!("Seeded {} questions", count);
        count
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.tables.read().await.to_snapshot()
    }

    /// Write the current state to the snapshot file, if there is one.
    pub async fn save(&self) -> Result<(), SnapshotError> {
        let Some(file) = &self.snapshot else {
            return Ok(());
        };
        let _guard = self.flush_lock.lock().await;
        let snapshot = self.snapshot().await;
        file.save(&snapshot).await?;
        debug!("Saved snapshot to {}", file.path().display());
        Ok(())
    }
}

#[async_trait]
impl StoreFlush for InMemoryStore {
    async fn flush(&self) -> Result<(), StoreError> {
        self.save()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl CoupleRepository for InMemoryStore {
    async fn find_by_id(&self, id: CoupleId) -> Result<Option<Couple>, StoreError> {
        Ok(self.tables.read().await.couples.get(&id).cloned())
    }

    async fn find_by_member(&self, user: &UserId) -> Result<Option<Couple>, StoreError> {
        Ok(self.tables.read().await.couple_of(user).cloned())
    }

    async fn find_by_code(&self, code: &ConnectionCode) -> Result<Option<Couple>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .couples
            .values()
            .find(|c| &c.connection_code == code)
            .cloned())
    }

    async fn create(&self, creator: &UserId, code: ConnectionCode) -> Result<Couple, StoreError> {
        let mut t = self.tables.write().await;
        if t.couples.values().any(|c| c.connection_code == code) {
            return Err(StoreError::Conflict(UniqueKey::ConnectionCode));
        }
        if t.couple_of(creator).is_some() {
            return Err(StoreError::Conflict(UniqueKey::CoupleMembership));
        }

        let id = CoupleId::new(next_id(&t.couples, |k| k.get()));
        let couple = Couple::new(id, creator.clone(), code, Utc::now());
        t.couples.insert(id, couple.clone());
        Ok(couple)
    }

    async fn set_partner(&self, couple: CoupleId, user: &UserId) -> Result<Couple, StoreError> {
        let mut t = self.tables.write().await;
        if t.couple_of(user).is_some() {
            return Err(StoreError::Conflict(UniqueKey::CoupleMembership));
        }
        let record = t
            .couples
            .get_mut(&couple)
            .ok_or_else(|| StoreError::not_found("couple", couple))?;

        record.join(user.clone()).map_err(|e| match e {
            DomainError::CoupleComplete => StoreError::Conflict(UniqueKey::PartnerSlot),
            other => StoreError::Backend(other.to_string()),
        })?;
        Ok(record.clone())
    }

    async fn set_anniversary(
        &self,
        couple: CoupleId,
        anniversary: Option<NaiveDate>,
    ) -> Result<Couple, StoreError> {
        let mut t = self.tables.write().await;
        let record = t
            .couples
            .get_mut(&couple)
            .ok_or_else(|| StoreError::not_found("couple", couple))?;
        record.anniversary = anniversary;
        Ok(record.clone())
    }

    async fn list_all(&self) -> Result<Vec<Couple>, StoreError> {
        Ok(self.tables.read().await.couples.values().cloned().collect())
    }
}

#[async_trait]
impl DailyQuestionRepository for InMemoryStore {
    async fn find_by_id(&self, id: DailyQuestionId) -> Result<Option<DailyQuestion>, StoreError> {
        Ok(self.tables.read().await.daily_questions.get(&id).cloned())
    }

    async fn find_for_date(
        &self,
        couple: CoupleId,
        date: NaiveDate,
    ) -> Result<Option<DailyQuestion>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .daily_questions
            .values()
            .find(|d| d.couple_id == couple && d.date == date)
            .cloned())
    }

    async fn get_or_create(
        &self,
        couple: CoupleId,
        question: QuestionId,
        date: NaiveDate,
    ) -> Result<DailyQuestion, StoreError> {
        let mut t = self.tables.write().await;
        if let Some(existing) = t
            .daily_questions
            .values()
            .find(|d| d.couple_id == couple && d.date == date)
        {
            return Ok(existing.clone());
        }
        if !t.couples.contains_key(&couple) {
            return Err(StoreError::not_found("couple", couple));
        }

        let id = DailyQuestionId::new(next_id(&t.daily_questions, |k| k.get()));
        let daily = DailyQuestion::new(id, couple, question, date, Utc::now());
        t.daily_questions.insert(id, daily.clone());
        Ok(daily)
    }

    async fn reveal(&self, id: DailyQuestionId, award: u64) -> Result<Option<Reward>, StoreError> {
        let mut t = self.tables.write().await;

        let daily = t
            .daily_questions
            .get(&id)
            .ok_or_else(|| StoreError::not_found("daily question", id))?;
        if daily.completed {
            return Ok(None);
        }
        let couple_id = daily.couple_id;
        let reward = t
            .couples
            .get(&couple_id)
            .ok_or_else(|| StoreError::not_found("couple", couple_id))?
            .progress
            .reward(award);

        // Everything is validated; from here on nothing can fail.
        for response in t.responses.values_mut().filter(|r| r.daily_question_id == id) {
            response.is_private = false;
        }
        if let Some(daily) = t.daily_questions.get_mut(&id) {
            daily.complete(award);
        }
        if let Some(couple) = t.couples.get_mut(&couple_id) {
            couple.progress = reward.after;
        }
        Ok(Some(reward))
    }
}

#[async_trait]
impl ResponseRepository for InMemoryStore {
    async fn find(
        &self,
        daily_question: DailyQuestionId,
        user: &UserId,
    ) -> Result<Option<Response>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .responses
            .values()
            .find(|r| r.daily_question_id == daily_question && &r.user_id == user)
            .cloned())
    }

    async fn list_for(&self, daily_question: DailyQuestionId) -> Result<Vec<Response>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .responses
            .values()
            .filter(|r| r.daily_question_id == daily_question)
            .cloned()
            .collect())
    }

    async fn insert(&self, response: NewResponse) -> Result<Response, StoreError> {
        let mut t = self.tables.write().await;
        if !t.daily_questions.contains_key(&response.daily_question_id) {
            return Err(StoreError::not_found(
                "daily question",
                response.daily_question_id,
            ));
        }
        if t.responses.values().any(|r| {
            r.daily_question_id == response.daily_question_id && r.user_id == response.user_id
        }) {
            return Err(StoreError::Conflict(UniqueKey::ResponsePerUser));
        }

        let id = ResponseId::new(next_id(&t.responses, |k| k.get()));
        let stored = response.into_response(id, Utc::now());
        t.responses.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl QuestionCatalog for InMemoryStore {
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.tables.read().await.profiles.get(user).cloned())
    }

    async fn upsert(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile, StoreError> {
        let mut t = self.tables.write().await;
        let profile = t
            .profiles
            .entry(user.clone())
            .or_insert_with(|| Profile::empty(user.clone()));
        update.apply_to(profile);
        Ok(profile.clone())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn append(
        &self,
        couple: CoupleId,
        sender: &UserId,
        content: MessageContent,
    ) -> Result<Message, StoreError> {
        let mut t = self.tables.write().await;
        let id = MessageId::new(next_id(&t.messages, |k| k.get()));
        let message = Message::new(id, couple, sender.clone(), content, Utc::now());
        t.messages.insert(id, message.clone());
        Ok(message)
    }

    async fn recent(&self, couple: CoupleId, limit: usize) -> Result<Vec<Message>, StoreError> {
        let t = self.tables.read().await;
        let mut recent: Vec<Message> = t
            .messages
            .values()
            .rev()
            .filter(|m| m.couple_id == couple)
            .take(limit)
            .cloned()
            .collect();
        recent.reverse();
        Ok(recent)
    }

    async fn mark_read(
        &self,
        couple: CoupleId,
        reader: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut t = self.tables.write().await;
        Ok(t.messages
            .values_mut()
            .filter(|m| m.couple_id == couple)
            .map(|m| m.mark_read_by(reader, at))
            .filter(|changed| *changed)
            .count())
    }
}

#[async_trait]
impl QuizRepository for InMemoryStore {
    async fn insert(
        &self,
        couple: CoupleId,
        user: &UserId,
        submission: QuizSubmission,
    ) -> Result<QuizResult, StoreError> {
        let mut t = self.tables.write().await;
        let id = QuizId::new(next_id(&t.quizzes, |k| k.get()));
        let (quiz_type, results) = submission.into_parts();
        let quiz = QuizResult {
            id,
            user_id: user.clone(),
            couple_id: couple,
            quiz_type,
            results,
            completed_at: Utc::now(),
        };
        t.quizzes.insert(id, quiz.clone());
        Ok(quiz)
    }

    async fn list_for_couple(&self, couple: CoupleId) -> Result<Vec<QuizResult>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .quizzes
            .values()
            .rev()
            .filter(|q| q.couple_id == couple)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use couplequest_application::{Repositories, SubmitAnswerInput, SubmitAnswerUseCase};
    use couplequest_domain::{Progress, QuestionModule};
    use serde_json::json;

    fn code(s: &str) -> ConnectionCode {
        ConnectionCode::parse(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    async fn paired(store: &InMemoryStore, progress: Progress) -> Couple {
        let alice = UserId::new("alice");
        let couple = store.create(&alice, code("482913")).await.unwrap();
        store.set_partner(couple.id, &UserId::new("bob")).await.unwrap();
        let mut t = store.tables.write().await;
        let c = t.couples.get_mut(&couple.id).unwrap();
        c.progress = progress;
        c.clone()
    }

    fn answer(user: &str, couple: CoupleId, dq: DailyQuestionId, text: &str) -> NewResponse {
        NewResponse {
            user_id: UserId::new(user),
            couple_id: couple,
            daily_question_id: dq,
            answer: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_couple_uniqueness() {
        let store = InMemoryStore::new();
        let alice = UserId::new("alice");
        let first = store.create(&alice, code("482913")).await.unwrap();
        assert_eq!(first.id, CoupleId::new(1));

        let err = store.create(&UserId::new("bob"), code("482913")).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict(UniqueKey::ConnectionCode));

        let err = store.create(&alice, code("777777")).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict(UniqueKey::CoupleMembership));

        store.set_partner(first.id, &UserId::new("bob")).await.unwrap();
        let err = store
            .set_partner(first.id, &UserId::new("carol"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict(UniqueKey::PartnerSlot));

        let err = store.set_partner(first.id, &alice).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict(UniqueKey::CoupleMembership));

        let found = store.find_by_member(&UserId::new("bob")).await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_daily_question_is_unique_per_date() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::default()).await;

        let a = store
            .get_or_create(couple.id, QuestionId::new(1), date())
            .await
            .unwrap();
        let b = store
            .get_or_create(couple.id, QuestionId::new(2), date())
            .await
            .unwrap();
        assert_eq!(a, b);

        let missing = store
            .get_or_create(CoupleId::new(99), QuestionId::new(1), date())
            .await;
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_one_response_per_user() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::default()).await;
        let dq = store
            .get_or_create(couple.id, QuestionId::new(1), date())
            .await
            .unwrap();

        let stored = ResponseRepository::insert(&store, answer("alice", couple.id, dq.id, "yes"))
            .await
            .unwrap();
        assert!(stored.is_private);

        let err = ResponseRepository::insert(&store, answer("alice", couple.id, dq.id, "again"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict(UniqueKey::ResponsePerUser));
        assert_eq!(store.list_for(dq.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reveal_applies_once() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::new(2, 95, 1)).await;
        let dq = store
            .get_or_create(couple.id, QuestionId::new(1), date())
            .await
            .unwrap();
        ResponseRepository::insert(&store, answer("alice", couple.id, dq.id, "yes"))
            .await
            .unwrap();
        ResponseRepository::insert(&store, answer("bob", couple.id, dq.id, "no"))
            .await
            .unwrap();

        let reward = store.reveal(dq.id, 10).await.unwrap().unwrap();
        assert_eq!(reward.after, Progress::new(3, 105, 2));
        assert_eq!(store.reveal(dq.id, 10).await.unwrap(), None);

        let dq = DailyQuestionRepository::find_by_id(&store, dq.id)
            .await
            .unwrap()
            .unwrap();
        assert!(dq.completed);
        assert_eq!(dq.xp_awarded, 10);
        assert!(store.list_for(dq.id).await.unwrap().iter().all(|r| !r.is_private));
        let couple = CoupleRepository::find_by_id(&store, couple.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(couple.progress, Progress::new(3, 105, 2));
    }

    #[tokio::test]
    async fn test_reveal_without_couple_changes_nothing() {
        let orphan = DailyQuestion::new(
            DailyQuestionId::new(1),
            CoupleId::new(42),
            QuestionId::new(1),
            date(),
            Utc::now(),
        );
        let response = answer("alice", CoupleId::new(42), orphan.id, "yes")
            .into_response(ResponseId::new(1), Utc::now());
        let store = InMemoryStore::from_snapshot(Snapshot {
            version: SNAPSHOT_VERSION,
            daily_questions: vec![orphan.clone()],
            responses: vec![response],
            ..Default::default()
        });

        let err = store.reveal(orphan.id, 10).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "couple", .. }));

        let after = store.snapshot().await;
        assert!(!after.daily_questions[0].completed);
        assert!(after.responses[0].is_private);
    }

    #[tokio::test]
    async fn test_messages_and_quizzes_ordering() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::default()).await;
        let other = CoupleId::new(99);
        let alice = UserId::new("alice");

        for text in ["one", "two", "three"] {
            store
                .append(couple.id, &alice, MessageContent::try_new(text).unwrap())
                .await
                .unwrap();
            store
                .append(other, &alice, MessageContent::try_new("noise").unwrap())
                .await
                .unwrap();
        }
        let recent = store.recent(couple.id, 2).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);

        for quiz_type in ["first", "second"] {
            QuizRepository::insert(
                &store,
                couple.id,
                &alice,
                QuizSubmission::try_new(quiz_type, json!({"score": 1})).unwrap(),
            )
            .await
            .unwrap();
        }
        let quizzes = store.list_for_couple(couple.id).await.unwrap();
        assert_eq!(quizzes[0].quiz_type, "second");
        assert_eq!(quizzes[1].quiz_type, "first");
    }

    #[tokio::test]
    async fn test_mark_read_touches_partner_messages_once() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::default()).await;
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        for (sender, text) in [(&alice, "hi"), (&bob, "hey"), (&alice, "dinner?")] {
            store
                .append(couple.id, sender, MessageContent::try_new(text).unwrap())
                .await
                .unwrap();
        }
        store
            .append(CoupleId::new(99), &alice, MessageContent::try_new("x").unwrap())
            .await
            .unwrap();

        assert_eq!(store.mark_read(couple.id, &bob, Utc::now()).await.unwrap(), 2);
        assert_eq!(store.mark_read(couple.id, &bob, Utc::now()).await.unwrap(), 0);

        let snapshot = store.snapshot().await;
        let read: Vec<bool> = snapshot.messages.iter().map(|m| m.is_read).collect();
        assert_eq!(read, vec![true, false, true, false]);
        assert!(snapshot.messages[0].read_at.is_some());
    }

    #[tokio::test]
    async fn test_anniversary_and_listing() {
        let store = InMemoryStore::new();
        let couple = paired(&store, Progress::default()).await;
        store.create(&UserId::new("carol"), code("555555")).await.unwrap();

        let updated = store.set_anniversary(couple.id, Some(date())).await.unwrap();
        assert_eq!(updated.anniversary, Some(date()));
        let missing = store.set_anniversary(CoupleId::new(99), None).await;
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));

        let ids: Vec<u64> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_profile_upsert() {
        let store = InMemoryStore::new();
        let bob = UserId::new("bob");
        assert!(ProfileRepository::find(&store, &bob).await.unwrap().is_none());

        let profile = store
            .upsert(
                &bob,
                ProfileUpdate {
                    religion: Some(" Hindu ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.religion.as_deref(), Some("hindu"));
        assert_eq!(ProfileRepository::find(&store, &bob).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_catalog() {
        let store = InMemoryStore::new();
        let seed = |text: &str| SeedQuestion {
            text: text.to_string(),
            category: "fun".to_string(),
            depth: "light".to_string(),
            module: QuestionModule::Daily,
            occasion: None,
            active: true,
        };

        assert_eq!(store.seed_questions(vec![seed("a"), seed("b")]).await, 2);
        assert_eq!(store.seed_questions(vec![seed("c")]).await, 0);

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, QuestionId::new(2));
    }

    #[tokio::test]
    async fn test_flush_round_trips_through_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = InMemoryStore::open(SnapshotFile::new(&path)).await.unwrap();
        let couple = paired(&store, Progress::new(1, 10, 1)).await;
        store.flush().await.unwrap();

        let reopened = InMemoryStore::open(SnapshotFile::new(&path)).await.unwrap();
        let restored = CoupleRepository::find_by_id(&reopened, couple.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restored, couple);
    }

    #[tokio::test]
    async fn test_simultaneous_answers_reward_once() {
        let store = InMemoryStore::new().into_shared();
        let couple = paired(&store, Progress::new(2, 95, 1)).await;
        let dq = store
            .get_or_create(couple.id, QuestionId::new(1), date())
            .await
            .unwrap();
        let use_case = Arc::new(SubmitAnswerUseCase::new(Repositories::from_store(
            store.clone(),
        )));

        let handles: Vec<_> = [("alice", "yes"), ("bob", "no")]
            .into_iter()
            .map(|(user, text)| {
                let use_case = use_case.clone();
                let id = dq.id;
                tokio::spawn(async move {
                    use_case
                        .execute(SubmitAnswerInput::new(user, id, text))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut revealed = 0;
        for handle in handles {
            if handle.await.unwrap().both_answered {
                revealed += 1;
            }
        }
        assert_eq!(revealed, 1);

        let couple = CoupleRepository::find_by_id(store.as_ref(), couple.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(couple.progress, Progress::new(3, 105, 2));
    }
}
