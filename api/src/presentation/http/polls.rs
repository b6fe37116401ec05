use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::polls::create_poll::{CreatePoll, PollValidationError};
use crate::application::use_cases::polls::get_poll::GetPoll;
use crate::application::use_cases::polls::list_polls::ListPolls;
use crate::application::use_cases::polls::update_poll::UpdatePoll;
use crate::bootstrap::app_context::AppContext;
use crate::domain::polls::poll::{self as domain, NewPoll, PollFilters, PollPatch, PollStatus};
use crate::domain::topics::TopicList;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: PollStatus,
    pub topics: Vec<String>,
    pub user_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Poll> for Poll {
    fn from(p: domain::Poll) -> Self {
        Poll {
            id: p.id,
            title: p.title,
            description: p.description,
            location: p.location,
            status: p.status,
            topics: p.topics.to_strings(),
            user_id: p.user_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollListResponse {
    pub polls: Vec<Poll>,
    pub total: u64,
    pub has_next_page: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPollsQuery {
    /// Comma-joined topics, OR-matched
    pub topics: Option<String>,
    pub status: Option<PollStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePollRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub topics: Option<Vec<String>>,
}

/// `description` and `location` tell an absent key (keep) apart from `null` (clear).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePollRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub description: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub location: DoubleOption<String>,
    pub status: Option<PollStatus>,
    pub topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    pub fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

fn status_for(err: anyhow::Error, event: &'static str) -> StatusCode {
    if let Some(v) = err.downcast_ref::<PollValidationError>() {
        tracing::debug!(error = %v, "poll_validation_failed");
        return StatusCode::BAD_REQUEST;
    }
    tracing::error!(error = ?err, "{}", event);
    StatusCode::INTERNAL_SERVER_ERROR
}

#[utoipa::path(get, path = "/api/polls", tag = "Polls",
    params(
        ("topics" = Option<String>, Query, description = "Comma-separated topics (any match)"),
        ("status" = Option<PollStatus>, Query, description = "Poll status"),
        ("search" = Option<String>, Query, description = "Title or topic contains"),
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("pageSize" = Option<u32>, Query, description = "Page size")
    ),
    responses((status = 200, body = PollListResponse)))]
pub async fn list_polls(
    State(ctx): State<AppContext>,
    Query(q): Query<ListPollsQuery>,
) -> Result<Json<PollListResponse>, StatusCode> {
    let filters = PollFilters {
        topics: q
            .topics
            .as_deref()
            .map(TopicList::parse)
            .unwrap_or_default()
            .into_vec(),
        status: q.status,
        search: q.search,
        page: q.page,
        page_size: q.page_size.or(Some(ctx.cfg.default_page_size)),
    };
    let repo = ctx.poll_repo();
    let uc = ListPolls {
        repo: repo.as_ref(),
    };
    let page = uc
        .execute(filters)
        .await
        .map_err(|e| status_for(e, "poll_list_failed"))?;
    Ok(Json(PollListResponse {
        polls: page.polls.into_iter().map(Into::into).collect(),
        total: page.total,
        has_next_page: page.has_next_page,
    }))
}

#[utoipa::path(post, path = "/api/polls", tag = "Polls", request_body = CreatePollRequest,
    responses((status = 200, body = Poll), (status = 400, description = "Missing title")))]
pub async fn create_poll(
    State(ctx): State<AppContext>,
    Json(req): Json<CreatePollRequest>,
) -> Result<Json<Poll>, StatusCode> {
    let repo = ctx.poll_repo();
    let uc = CreatePoll {
        repo: repo.as_ref(),
    };
    let poll = uc
        .execute(NewPoll {
            title: req.title,
            description: req.description,
            location: req.location,
            topics: TopicList::from_raw(req.topics.unwrap_or_default()),
            user_id: None,
        })
        .await
        .map_err(|e| status_for(e, "poll_create_failed"))?;
    Ok(Json(poll.into()))
}

#[utoipa::path(get, path = "/api/polls/{id}", tag = "Polls",
    params(("id" = Uuid, Path, description = "Poll ID")),
    responses((status = 200, body = Poll), (status = 404)))]
pub async fn get_poll(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poll>, StatusCode> {
    let repo = ctx.poll_repo();
    let uc = GetPoll {
        repo: repo.as_ref(),
    };
    let poll = uc
        .execute(id)
        .await
        .map_err(|e| status_for(e, "poll_get_failed"))?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(poll.into()))
}

#[utoipa::path(patch, path = "/api/polls/{id}", tag = "Polls", request_body = UpdatePollRequest,
    params(("id" = Uuid, Path, description = "Poll ID")),
    responses((status = 200, body = Poll), (status = 400), (status = 404)))]
pub async fn update_poll(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePollRequest>,
) -> Result<Json<Poll>, StatusCode> {
    let repo = ctx.poll_repo();
    let uc = UpdatePoll {
        repo: repo.as_ref(),
    };
    let patch = PollPatch {
        title: req.title,
        description: req.description.into_patch(),
        location: req.location.into_patch(),
        status: req.status,
        topics: req.topics.map(TopicList::from_raw),
    };
    let poll = uc
        .execute(id, patch)
        .await
        .map_err(|e| status_for(e, "poll_update_failed"))?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(poll.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/polls", get(list_polls).post(create_poll))
        .route("/polls/:id", get(get_poll).patch(update_poll))
        .with_state(ctx)
}
