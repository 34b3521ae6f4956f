//! Request dispatcher: JSON-RPC methods to use cases.
//!
//! | Method | Use case | Mutates |
//! |--------|----------|---------|
//! | `questions.submit` | [`SubmitAnswerUseCase`] | yes |
//! | `questions.today` | [`TodayQuestionUseCase`] | yes (draws on first access) |
//! | `questions.browse` | [`BrowseQuestionsUseCase`] | no |
//! | `couples.create` / `couples.join` | [`CoupleUseCase`] | yes |
//! | `couples.current` | [`CoupleUseCase`] | no |
//! | `couples.update` | [`CoupleUseCase`] | yes |
//! | `couples.leaderboard` | [`LeaderboardUseCase`] | no |
//! | `profile.update` | [`UpdateProfileUseCase`] | yes |
//! | `chat.send` / `chat.read` / `chat.list` | [`ChatUseCase`] | send and read |
//! | `quizzes.save` / `quizzes.list` / `quizzes.partner` | [`QuizUseCase`] | save only |
//!
//! Every call carries `params.userId`, the identity asserted by the
//! authentication gateway in front of this server. Failures are logged here
//! and nowhere deeper: `warn!` for internal errors, `debug!` for the
//! caller's own mistakes.

use super::protocol::{JSONRPC_VERSION, RpcError, RpcRequest, RpcResponse};
use chrono::NaiveDate;
use couplequest_application::{
    ActivityLogger, BrowseFilter, BrowseQuestionsUseCase, ChatUseCase, CoupleUseCase,
    ErrorStatus, LeaderboardUseCase, NoActivityLogger, NoStoreFlush, QuizUseCase, Repositories, ServiceParams,
    StoreFlush, SubmitAnswerInput, SubmitAnswerUseCase, TodayQuestionUseCase,
    UpdateProfileUseCase,
};
use couplequest_domain::{DailyQuestionId, ProfileUpdate, UserId};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Response sent when a response cannot be serialized at all.
const FALLBACK_RESPONSE: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#;

const MUTATING_METHODS: &[&str] = &[
    "questions.submit",
    "questions.today",
    "couples.create",
    "couples.join",
    "couples.update",
    "profile.update",
    "chat.send",
    "chat.read",
    "quizzes.save",
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitParams {
    daily_question_id: DailyQuestionId,
    answer: String,
}

#[derive(Deserialize)]
struct TodayParams {
    #[serde(default)]
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct BrowseParams {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    depth: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinParams {
    connection_code: String,
}

#[derive(Deserialize)]
struct UpdateCoupleParams {
    #[serde(default)]
    anniversary: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartnerQuizParams {
    quiz_type: String,
}

#[derive(Deserialize)]
struct SendParams {
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveQuizParams {
    #[serde(default)]
    quiz_type: String,
    #[serde(default)]
    results: Value,
}

/// Routes JSON-RPC requests to use cases.
pub struct Dispatcher {
    submit: SubmitAnswerUseCase,
    today: TodayQuestionUseCase,
    browse: BrowseQuestionsUseCase,
    couples: CoupleUseCase,
    leaderboard: LeaderboardUseCase,
    profile: UpdateProfileUseCase,
    chat: ChatUseCase,
    quizzes: QuizUseCase,
    flush: Arc<dyn StoreFlush>,
}

impl Dispatcher {
    pub fn new(repos: Repositories, params: &ServiceParams) -> Self {
        Self::with_activity_logger(repos, params, Arc::new(NoActivityLogger))
    }

    /// Like [`new`](Self::new), recording couple activity to `activity`.
    pub fn with_activity_logger(
        repos: Repositories,
        params: &ServiceParams,
        activity: Arc<dyn ActivityLogger>,
    ) -> Self {
        Self {
            submit: SubmitAnswerUseCase::new(repos.clone()).with_activity_logger(activity.clone()),
            today: TodayQuestionUseCase::new(repos.clone()),
            browse: BrowseQuestionsUseCase::new(repos.questions.clone()),
            couples: CoupleUseCase::new(repos.clone()).with_activity_logger(activity.clone()),
            leaderboard: LeaderboardUseCase::new(repos.clone()),
            profile: UpdateProfileUseCase::new(repos.profiles.clone()),
            chat: ChatUseCase::new(repos.clone(), params).with_activity_logger(activity.clone()),
            quizzes: QuizUseCase::new(repos).with_activity_logger(activity),
            flush: Arc::new(NoStoreFlush),
        }
    }

    /// Persist the store after every successful mutating call.
    pub fn with_store_flush(mut self, flush: Arc<dyn StoreFlush>) -> Self {
        self.flush = flush;
        self
    }

    /// Handle one raw frame. Returns the encoded response, or `None` for
    /// notifications.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                debug!("Unparsable frame: {}", e);
                return Some(encode(&RpcResponse::failure(
                    Value::Null,
                    RpcError::parse_error(e),
                )));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: RpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(encode(&RpcResponse::failure(
                    id,
                    RpcError::invalid_request(e),
                )));
            }
        };

        self.dispatch(request).await.map(|r| encode(&r))
    }

    /// Execute `request`. Returns `None` for notifications.
    pub async fn dispatch(&self, request: RpcRequest) -> Option<RpcResponse> {
        let RpcRequest {
            jsonrpc,
            id,
            method,
            params,
        } = request;

        let outcome = if jsonrpc != JSONRPC_VERSION {
            Err(RpcError::invalid_request(format!(
                "unsupported jsonrpc version '{}'",
                jsonrpc
            )))
        } else {
            self.call(&method, params.unwrap_or_else(|| json!({}))).await
        };

        if outcome.is_ok() && MUTATING_METHODS.contains(&method.as_str()) {
            // The write already happened; a failed flush is retried by the next one.
            if let Err(e) = self.flush.flush().await {
                warn!("Failed to persist store after {}: {}", method, e);
            }
        }

        let id = id?;
        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        if !params.is_object() {
            return Err(RpcError::invalid_params("params must be an object"));
        }
        let caller = caller(&params)?;

        match method {
            "questions.submit" => {
                let p: SubmitParams = parse(params)?;
                let output = self
                    .submit
                    .execute(SubmitAnswerInput::new(
                        caller,
                        p.daily_question_id,
                        p.answer,
                    ))
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(output)
            }
            "questions.today" => {
                let p: TodayParams = parse(params)?;
                let today = p
                    .date
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                let view = self
                    .today
                    .execute(&caller, today)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(view)
            }
            "questions.browse" => {
                let p: BrowseParams = parse(params)?;
                let questions = self
                    .browse
                    .execute(&BrowseFilter {
                        category: p.category,
                        depth: p.depth,
                    })
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "questions": to_result(questions)? }))
            }
            "couples.create" => {
                let created = self
                    .couples
                    .create(&caller)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(created)
            }
            "couples.join" => {
                let p: JoinParams = parse(params)?;
                let couple_id = self
                    .couples
                    .join(&caller, &p.connection_code)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "success": true, "coupleId": couple_id }))
            }
            "couples.current" => {
                let view = self
                    .couples
                    .current(&caller)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(view)
            }
            "couples.update" => {
                let p: UpdateCoupleParams = parse(params)?;
                let couple = self
                    .couples
                    .set_anniversary(&caller, p.anniversary)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(couple)
            }
            "couples.leaderboard" => {
                let entries = self
                    .leaderboard
                    .execute()
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "leaderboard": to_result(entries)? }))
            }
            "profile.update" => {
                let update: ProfileUpdate = parse(params)?;
                let profile = self
                    .profile
                    .execute(&caller, update)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(profile)
            }
            "chat.list" => {
                let messages = self
                    .chat
                    .list(&caller)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "messages": to_result(messages)? }))
            }
            "chat.send" => {
                let p: SendParams = parse(params)?;
                let message = self
                    .chat
                    .send(&caller, &p.content)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(message)
            }
            "chat.read" => {
                let updated = self
                    .chat
                    .mark_read(&caller)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "success": true, "updated": updated }))
            }
            "quizzes.save" => {
                let p: SaveQuizParams = parse(params)?;
                let quiz = self
                    .quizzes
                    .save(&caller, &p.quiz_type, p.results)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(quiz)
            }
            "quizzes.list" => {
                let quizzes = self
                    .quizzes
                    .list(&caller)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                Ok(json!({ "quizzes": to_result(quizzes)? }))
            }
            "quizzes.partner" => {
                let p: PartnerQuizParams = parse(params)?;
                let view = self
                    .quizzes
                    .partner_results(&caller, &p.quiz_type)
                    .await
                    .map_err(|e| fail(method, e.status(), e))?;
                to_result(view)
            }
            other => Err(RpcError::method_not_found(other)),
        }
    }
}

/// The gateway-asserted identity in `params.userId`.
fn caller(params: &Value) -> Result<UserId, RpcError> {
    params
        .get("userId")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(UserId::new)
        .ok_or_else(|| RpcError::application(ErrorStatus::Unauthorized, "Not authenticated"))
}

fn parse<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(RpcError::invalid_params)
}

fn to_result<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| {
        warn!("Failed to serialize result: {}", e);
        RpcError::application(ErrorStatus::Internal, "Internal server error")
    })
}

/// Translate a use case failure, logging it at the boundary.
fn fail(method: &str, status: ErrorStatus, err: impl Display) -> RpcError {
    if status.is_client_error() {
        debug!("{} rejected ({}): {}", method, status.http_code(), err);
        RpcError::application(status, err.to_string())
    } else {
        warn!("{} failed: {}", method, err);
        RpcError::application(status, "Internal server error")
    }
}

fn encode(response: &RpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| FALLBACK_RESPONSE.to_string())
}
