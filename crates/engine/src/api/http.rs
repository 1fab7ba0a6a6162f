//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use frame_survivor_domain::WalletAddress;
use frame_survivor_shared::{ErrorBody, SlootData};

use super::validation::{parse_action, parse_start, ValidationError};
use crate::app::App;
use crate::use_cases::session::{SessionError, SessionView};

/// Body returned when an action targets a session that was never started.
pub const SESSION_MISSING: &str = "Game is not started or state is missing.";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/start", post(start))
        .route("/explore", post(explore))
        .route("/battle", post(battle))
        .route("/get_sloot", get(get_sloot))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Frame actions
// =============================================================================

async fn start(State(app): State<Arc<App>>, body: Bytes) -> Result<Html<String>, ApiError> {
    let started = Instant::now();
    let request = parse_start(&body)?;
    let view = app
        .use_cases
        .session
        .begin
        .execute(request.session_id, request.starting_seed)
        .await?;
    Ok(respond(&app, "/start", &view, started))
}

async fn explore(State(app): State<Arc<App>>, body: Bytes) -> Result<Html<String>, ApiError> {
    let started = Instant::now();
    let request = parse_action(&body)?;
    tracing::info!(
        fid = %request.session_id,
        button_index = request.button_index,
        "Explore action"
    );
    let view = app
        .use_cases
        .session
        .explore
        .execute(request.session_id, request.button_index)
        .await?;
    Ok(respond(&app, "/explore", &view, started))
}

async fn battle(State(app): State<Arc<App>>, body: Bytes) -> Result<Html<String>, ApiError> {
    let started = Instant::now();
    let request = parse_action(&body)?;
    tracing::info!(
        fid = %request.session_id,
        button_index = request.button_index,
        "Battle action"
    );
    let view = app
        .use_cases
        .session
        .battle
        .execute(request.session_id, request.button_index)
        .await?;
    Ok(respond(&app, "/battle", &view, started))
}

fn respond(
    app: &App,
    endpoint: &'static str,
    view: &SessionView,
    started: Instant,
) -> Html<String> {
    let html = app.frames.document(view).to_html();
    tracing::info!(
        endpoint,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Frame response composed"
    );
    Html(html)
}

// =============================================================================
// Sloot lookup
// =============================================================================

#[derive(Debug, Deserialize)]
struct SlootQuery {
    address: Option<String>,
}

async fn get_sloot(State(app): State<Arc<App>>, Query(query): Query<SlootQuery>) -> Response {
    let address = match query.address.map(WalletAddress::parse) {
        Some(Ok(address)) => address,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Invalid address provided")),
            )
                .into_response()
        }
    };

    match app.use_cases.lookup.execute(&address).await {
        Ok(attributes) => Json(SlootData::from(&attributes)).into_response(),
        Err(e) => {
            tracing::error!(address = %address, error = %e, "Sloot lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response()
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::BadRequest(error.0)
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::SessionNotFound(id) => {
                tracing::info!(fid = %id, "Action on missing session");
                ApiError::BadRequest(SESSION_MISSING.to_string())
            }
            SessionError::Upstream(e) => ApiError::Upstream(e.to_string()),
            SessionError::Repo(e) => ApiError::Internal(e.to_string()),
            SessionError::Domain(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream service error").into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::frames::{FrameResponder, DRAW_LABEL, NEXT_LABEL};
    use crate::app::{AppOptions, AppPorts};
    use crate::infrastructure::clock::{FixedClock, FixedRandom, SystemRandom};
    use crate::infrastructure::combat::StatCombatResolver;
    use crate::infrastructure::memory_store::InMemorySessionRepo;
    use crate::infrastructure::ports::{
        CharacterProvider, MockCharacterProvider, SessionRepo, UpstreamError,
    };
    use crate::infrastructure::renderer::{CardBackgrounds, SvgFrameRenderer};
    use crate::infrastructure::sloot::SeededSlootProvider;
    use crate::test_fixtures::{draw_card, fixed_instant, session_id};
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    const SEED: &str = "0xa48dd46161d8e57725f5e26e34ec19c13ff7f3b9";
    const ADDRESS: &str = "0xd2b1ddc6c88e865a33cb1a565e0058d757042974";

    fn router_with(
        provider: Arc<dyn CharacterProvider>,
        store: Arc<InMemorySessionRepo>,
    ) -> Router {
        let app = App::new(
            AppPorts {
                sessions: store,
                provider,
                // Every roll lands in the draw band
                resolver: Arc::new(StatCombatResolver::new(Arc::new(FixedRandom {
                    range: 0,
                    unit: 0.01,
                }))),
                renderer: Arc::new(SvgFrameRenderer::new(CardBackgrounds::default())),
                clock: Arc::new(FixedClock(fixed_instant())),
            },
            AppOptions {
                upstream_timeout: Duration::from_secs(5),
                display_utc_offset_hours: 8,
                draw_card: draw_card(),
            },
            FrameResponder::new(
                "https://game.test/start",
                "https://game.test/explore",
                "https://game.test/battle",
            ),
        );
        routes().with_state(Arc::new(app))
    }

    fn router(store: Arc<InMemorySessionRepo>) -> Router {
        router_with(Arc::new(SeededSlootProvider::new(Arc::new(SystemRandom::new()))), store)
    }

    async fn post(router: &Router, uri: &str, body: String) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn start_body(fid: u64) -> String {
        format!(r#"{{"untrustedData":{{"fid":{fid},"messageHash":"{SEED}","buttonIndex":1}}}}"#)
    }

    fn action_body(fid: u64, button: u8) -> String {
        format!(r#"{{"untrustedData":{{"fid":{fid},"buttonIndex":{button}}}}}"#)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let router = router(Arc::new(InMemorySessionRepo::new()));
        assert_eq!(get(&router, "/api/health").await, (StatusCode::OK, "OK".to_string()));
        assert_eq!(get(&router, "/").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn start_then_browse_to_the_last_opponent() {
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router(store.clone());

        let (status, html) = post(&router, "/start", start_body(226)).await;
        assert_eq!(status, StatusCode::OK);
        let post_url =
            r#"<meta property="fc:frame:post_url" content="https://game.test/explore" />"#;
        assert!(html.contains(post_url));
        assert!(html.contains("fc:frame:button:3"));
        assert!(html.contains("og:image"));

        let mut last = String::new();
        for _ in 0..4 {
            let (status, html) = post(&router, "/explore", action_body(226, 3)).await;
            assert_eq!(status, StatusCode::OK);
            last = html;
        }
        assert!(!last.contains(NEXT_LABEL));
        assert!(!last.contains("fc:frame:button:3"));

        let record = store.get(session_id(226)).await.unwrap().unwrap();
        assert_eq!(record.encounter().map(|e| e.current_index()), Some(4));
        assert_eq!(record.last_enter_timestamp(), "2024/02/02 04:30:05");
    }

    #[tokio::test]
    async fn engage_and_fight_resolves_and_prunes() {
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router(store.clone());
        post(&router, "/start", start_body(7)).await;

        let (_, entry) = post(&router, "/explore", action_body(7, 2)).await;
        assert!(entry.contains("https://game.test/battle"));
        assert!(entry.contains("Fight like a MAN!"));

        let (status, result) = post(&router, "/battle", action_body(7, 2)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(result.contains("https://game.test/start"));
        assert!(result.contains(DRAW_LABEL));
        assert!(result.contains(draw_card().as_str()));

        let record = store.get(session_id(7)).await.unwrap().unwrap();
        assert_eq!(record.battle_count(), 1);
        assert_eq!(record.draw_count(), 1);
        assert!(record.encounter().is_none());
    }

    #[tokio::test]
    async fn actions_on_missing_session_are_rejected_without_writes() {
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router(store.clone());

        let explore = post(&router, "/explore", action_body(999, 3)).await;
        let battle = post(&router, "/battle", action_body(999, 2)).await;

        assert_eq!(explore, (StatusCode::BAD_REQUEST, SESSION_MISSING.to_string()));
        assert_eq!(battle.0, StatusCode::BAD_REQUEST);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn malformed_packets_are_bad_requests() {
        let router = router(Arc::new(InMemorySessionRepo::new()));

        assert_eq!(post(&router, "/explore", "{}".into()).await.0, StatusCode::BAD_REQUEST);
        assert_eq!(
            post(&router, "/explore", r#"{"untrustedData":{"fid":1,"buttonIndex":256}}"#.into())
                .await
                .0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            post(&router, "/start", r#"{"untrustedData":{"fid":1}}"#.into()).await.0,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn unbound_buttons_rerender_without_writes() {
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router(store.clone());
        let (_, started) = post(&router, "/start", start_body(31)).await;
        let before = store.get(session_id(31)).await.unwrap().unwrap();

        for button in [0, 9, 255] {
            let (status, html) = post(&router, "/explore", action_body(31, button)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(html, started);
        }

        post(&router, "/explore", action_body(31, 2)).await;
        let engaged = store.get(session_id(31)).await.unwrap().unwrap();
        let (status, html) = post(&router, "/battle", action_body(31, 0)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Fight like a MAN!"));

        assert_eq!(store.get(session_id(31)).await.unwrap().unwrap(), engaged);
        assert_eq!(engaged.explore_count(), before.explore_count());
    }

    #[tokio::test]
    async fn get_sloot_validates_address() {
        let router = router(Arc::new(InMemorySessionRepo::new()));

        let (status, body) = get(&router, "/get_sloot?address=0x1234").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Invalid address provided"}"#);

        assert_eq!(get(&router, "/get_sloot").await.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_sloot_returns_attributes() {
        let router = router(Arc::new(InMemorySessionRepo::new()));

        let (status, body) = get(&router, &format!("/get_sloot?address={ADDRESS}")).await;

        assert_eq!(status, StatusCode::OK);
        let data: SlootData = serde_json::from_str(&body).unwrap();
        assert_eq!(data.address, ADDRESS);
        assert_eq!(data.items.len(), 8);
    }

    #[tokio::test]
    async fn get_sloot_provider_failure_is_500_json() {
        let mut provider = MockCharacterProvider::new();
        provider
            .expect_fetch_character()
            .returning(|_| Err(UpstreamError::request_failed("sloot", "503 unavailable")));
        let router = router_with(Arc::new(provider), Arc::new(InMemorySessionRepo::new()));

        let (status, body) = get(&router, &format!("/get_sloot?address={ADDRESS}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert!(error.error.contains("503 unavailable"));
    }

    #[tokio::test]
    async fn begin_upstream_failure_is_500_and_writes_nothing() {
        let mut provider = MockCharacterProvider::new();
        provider
            .expect_fetch_character()
            .returning(|_| Err(UpstreamError::request_failed("sloot", "503 unavailable")));
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router_with(Arc::new(provider), store.clone());

        let (status, _) = post(&router, "/start", start_body(5)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_navigation_is_serialized() {
        let store = Arc::new(InMemorySessionRepo::new());
        let router = router(store.clone());
        post(&router, "/start", start_body(11)).await;

        let presses: Vec<_> = (0..3)
            .map(|_| {
                let router = router.clone();
                tokio::spawn(async move { post(&router, "/explore", action_body(11, 3)).await })
            })
            .collect();
        for press in presses {
            assert_eq!(press.await.unwrap().0, StatusCode::OK);
        }

        let record = store.get(session_id(11)).await.unwrap().unwrap();
        assert_eq!(record.encounter().map(|e| e.current_index()), Some(3));
    }
}
