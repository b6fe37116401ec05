use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use polls_api::application::ports::poll_repository::PollRepository;
use polls_api::bootstrap::app_context::{AppContext, AppServices};
use polls_api::bootstrap::config::Config;
use polls_api::infrastructure::db::repositories::poll_repository_sqlx::SqlxPollRepository;
use polls_api::infrastructure::memory::poll_repository_memory::InMemoryPollRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            polls_api::presentation::http::polls::list_polls,
            polls_api::presentation::http::polls::create_poll,
            polls_api::presentation::http::polls::get_poll,
            polls_api::presentation::http::polls::update_poll,
            polls_api::presentation::http::topics::list_topics,
            polls_api::presentation::http::health::health,
        ),
        components(schemas(
            polls_api::domain::polls::poll::PollStatus,
            polls_api::presentation::http::polls::Poll,
            polls_api::presentation::http::polls::PollListResponse,
            polls_api::presentation::http::polls::CreatePollRequest,
            polls_api::presentation::http::polls::UpdatePollRequest,
            polls_api::presentation::http::topics::TopicsResponse,
            polls_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Polls", description = "Polls and topic filtering"),
            (name = "Topics", description = "Available poll topics"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => CorsLayer::new()
            .allow_origin(v)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
            .allow_methods(methods)
            .allow_headers(headers),
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "polls_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting polls backend");

    let poll_repo: Arc<dyn PollRepository> = match cfg.database_url.as_deref() {
        Some(url) => {
            let pool = polls_api::infrastructure::db::connect_pool(url).await?;
            polls_api::infrastructure::db::migrate(&pool).await?;
            info!("poll_store_postgres");
            Arc::new(SqlxPollRepository::new(pool))
        }
        None => {
            tracing::warn!("poll_store_in_memory");
            Arc::new(InMemoryPollRepository::new())
        }
    };

    let ctx = AppContext::new(cfg.clone(), AppServices::new(poll_repo));

    let app = Router::new()
        .nest(
            "/api",
            polls_api::presentation::http::health::routes(ctx.clone()),
        )
        .nest(
            "/api",
            polls_api::presentation::http::polls::routes(ctx.clone()),
        )
        .nest(
            "/api",
            polls_api::presentation::http::topics::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
    });

    match server.await {
        Ok(Ok(())) => info!("HTTP API stopped"),
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
    Ok(())
}
