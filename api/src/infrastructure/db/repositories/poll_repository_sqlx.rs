use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::poll_repository::PollRepository;
use crate::domain::polls::poll::{NewPoll, Poll, PollFilters, PollPage, PollPatch, PollStatus};
use crate::domain::topics::TopicList;
use crate::infrastructure::db::PgPool;

const POLL_COLUMNS: &str =
    "id, title, description, location, status, topics, user_id, created_at, updated_at";

// $1 topics (OR overlap, empty array disables), $2 status, $3 escaped ILIKE pattern
const FILTER_CLAUSE: &str = r#"(cardinality($1::text[]) = 0 OR topics && $1::text[])
      AND ($2::text IS NULL OR status = $2)
      AND ($3::text IS NULL OR title ILIKE $3 ESCAPE '\'
           OR EXISTS (SELECT 1 FROM unnest(topics) AS t(name) WHERE t.name ILIKE $3 ESCAPE '\'))"#;

pub struct SqlxPollRepository {
    pub pool: PgPool,
}

impl SqlxPollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(r: PgRow) -> anyhow::Result<Poll> {
    let status: String = r.get("status");
    let status = PollStatus::parse(&status)
        .ok_or_else(|| anyhow::anyhow!("unknown poll status: {status}"))?;
    let topics: Vec<String> = r.get("topics");
    Ok(Poll {
        id: r.get("id"),
        title: r.get("title"),
        description: r.try_get("description").ok().flatten(),
        location: r.try_get("location").ok().flatten(),
        status,
        topics: TopicList::from_raw(topics),
        user_id: r.try_get("user_id").ok().flatten(),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl PollRepository for SqlxPollRepository {
    async fn find_with_filters(&self, filters: &PollFilters) -> anyhow::Result<PollPage> {
        let topics: Vec<String> = filters.topics.iter().map(|t| t.to_string()).collect();
        let status = filters.status.map(|s| s.as_str());
        let pattern = filters.search_pattern();

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*)::BIGINT FROM polls WHERE {FILTER_CLAUSE}"
        ))
        .bind(&topics)
        .bind(status)
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            "SELECT {POLL_COLUMNS} FROM polls WHERE {FILTER_CLAUSE}
             ORDER BY created_at ASC, id ASC
             LIMIT $4 OFFSET $5"
        ))
        .bind(&topics)
        .bind(status)
        .bind(pattern.as_deref())
        .bind(i64::from(filters.page_size()))
        .bind(i64::try_from(filters.offset())?)
        .fetch_all(&self.pool)
        .await?;

        let polls = rows.into_iter().map(map_row).collect::<anyhow::Result<Vec<_>>>()?;
        let total = u64::try_from(total)?;
        let has_next_page = filters.offset() + (polls.len() as u64) < total;
        Ok(PollPage {
            polls,
            total,
            has_next_page,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Poll>> {
        let row = sqlx::query(&format!("SELECT {POLL_COLUMNS} FROM polls WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_row).transpose()
    }

    async fn create(&self, poll: NewPoll) -> anyhow::Result<Poll> {
        let row = sqlx::query(&format!(
            "INSERT INTO polls (id, title, description, location, status, topics, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {POLL_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&poll.title)
        .bind(poll.description.as_deref())
        .bind(poll.location.as_deref())
        .bind(PollStatus::Live.as_str())
        .bind(poll.topics.to_strings())
        .bind(poll.user_id)
        .fetch_one(&self.pool)
        .await?;
        map_row(row)
    }

    async fn update(&self, id: Uuid, patch: PollPatch) -> anyhow::Result<Option<Poll>> {
        // $3/$5 flag whether description/location were sent; a sent NULL clears the column
        let row = sqlx::query(&format!(
            "UPDATE polls SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                location = CASE WHEN $5 THEN $6 ELSE location END,
                status = COALESCE($7, status),
                topics = COALESCE($8, topics),
                updated_at = now()
             WHERE id = $1
             RETURNING {POLL_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.is_some())
        .bind(patch.description.flatten())
        .bind(patch.location.is_some())
        .bind(patch.location.flatten())
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.topics.as_ref().map(TopicList::to_strings))
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_row).transpose()
    }

    async fn topic_lists(&self) -> anyhow::Result<Vec<TopicList>> {
        let rows = sqlx::query("SELECT topics FROM polls WHERE cardinality(topics) > 0")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| TopicList::from_raw(r.get::<Vec<String>, _>("topics")))
            .collect())
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
