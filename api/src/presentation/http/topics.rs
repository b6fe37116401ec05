use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::topics::list_topics::ListTopics;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicsResponse {
    /// Unique topics across all polls, ascending
    pub topics: Vec<String>,
}

#[utoipa::path(get, path = "/api/topics", tag = "Topics",
    responses((status = 200, body = TopicsResponse)))]
pub async fn list_topics(State(ctx): State<AppContext>) -> Result<Json<TopicsResponse>, StatusCode> {
    let repo = ctx.poll_repo();
    let uc = ListTopics {
        repo: repo.as_ref(),
    };
    let topics = uc.execute().await.map_err(|e| {
        tracing::error!(error = ?e, "topic_list_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(TopicsResponse {
        topics: topics.into_iter().map(String::from).collect(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/topics", get(list_topics)).with_state(ctx)
}
