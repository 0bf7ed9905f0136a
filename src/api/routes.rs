//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::types::{AgentResponse, RootMessage, TripRequest};
use crate::agent::Dispatcher;
use crate::config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

/// Build the router with CORS and request tracing applied.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root))
        .route("/data", post(direct_summary))
        .route("/data2", post(direct_summary))
        .route("/agent", post(agent_summary))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// GET / - Liveness message.
async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Hello, route advisor!".to_string(),
    })
}

/// POST /data, POST /data2 - Direct model answer, serialized as a JSON string.
async fn direct_summary(
    State(state): State<Arc<AppState>>,
    Json(trip): Json<TripRequest>,
) -> Result<Json<String>, (StatusCode, String)> {
    tracing::info!(
        origin = %trip.origin,
        destination = %trip.destination,
        "Direct route request"
    );

    state.dispatcher.direct(&trip).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Direct dispatch failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Model request failed: {}", e),
        )
    })
}

/// POST /agent - Tool-loop answer wrapped as `{"result": ...}`.
async fn agent_summary(
    State(state): State<Arc<AppState>>,
    Json(trip): Json<TripRequest>,
) -> Result<Json<AgentResponse>, (StatusCode, String)> {
    tracing::info!(
        origin = %trip.origin,
        destination = %trip.destination,
        "Agent route request"
    );

    let result = state.dispatcher.with_tools(&trip).await.map_err(|e| {
        tracing::error!(error = %e, "Agent dispatch failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Agent failed: {}", e),
        )
    })?;

    Ok(Json(AgentResponse { result }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatResponse, FunctionCall, ToolCall};
    use crate::test_support::ScriptedLlm;
    use crate::tools::ToolRegistry;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    const TRIP: &str = r#"{"fromm":"Sousse","dest":"Tunis","time":"08:00","vehicule":"car"}"#;

    fn app(llm: Arc<ScriptedLlm>) -> Router {
        let config = Config::new(String::new(), "gemini-1.5-flash".to_string());
        let dispatcher = Dispatcher::new(&config, llm, ToolRegistry::default());
        router(Arc::new(AppState { config, dispatcher }))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let response = app(ScriptedLlm::new(vec![]))
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body: RootMessage =
            serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(body.message, "Hello, route advisor!");
    }

    #[tokio::test]
    async fn data_returns_model_text() {
        let llm = ScriptedLlm::text("Traffic Congestion: Heavy");
        let response = app(llm.clone())
            .oneshot(post_json("/data", TRIP))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let text: String = serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(text, "Traffic Congestion: Heavy");

        let prompt = llm.calls()[0].messages[0].content.clone().unwrap_or_default();
        assert!(prompt.contains("Vehicle Type: car"));
        assert!(prompt.contains("Departure Time: 08:00"));
    }

    #[tokio::test]
    async fn data2_returns_session_text_unmodified() {
        let reply = "Smart Route:\n42 min\n140 km\n(Win 5 min, 3 km less)";
        let response = app(ScriptedLlm::text(reply))
            .oneshot(post_json("/data2", TRIP))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let text: String = serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(text, reply);
    }

    #[tokio::test]
    async fn agent_wraps_result() {
        let llm = ScriptedLlm::new(vec![
            ChatResponse {
                content: None,
                tool_calls: Some(vec![ToolCall {
                    id: "call_0".to_string(),
                    function: FunctionCall {
                        name: "Weather".to_string(),
                        arguments: r#"{"input":"Tunis"}"#.to_string(),
                    },
                }]),
            },
            ChatResponse {
                content: Some("Decision Reasoning: clear roads".to_string()),
                tool_calls: None,
            },
        ]);

        let response = app(llm)
            .oneshot(post_json("/agent", TRIP))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body: AgentResponse =
            serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(body.result, "Decision Reasoning: clear roads");
    }

    #[tokio::test]
    async fn model_failure_is_a_server_error() {
        let llm = ScriptedLlm::with_results(vec![Err("403 API key not valid".to_string())]);
        let response = app(llm)
            .oneshot(post_json("/data", TRIP))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("API key not valid"));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_before_dispatch() {
        let llm = ScriptedLlm::new(vec![]);
        let response = app(llm.clone())
            .oneshot(post_json("/data", r#"{"fromm":"Sousse"}"#))
            .await
            .expect("response");

        assert!(response.status().is_client_error());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/data")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .expect("request");

        let response = app(ScriptedLlm::new(vec![]))
            .oneshot(request)
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
    }
}
