//! Integration tests for the HTTP agent client
//!
//! Runs the client against an in-process axum server standing in for the
//! agent service

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bikehero::api::{AgentApi, ApiError, HttpAgentClient};
use bikehero::config::ApiConfig;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test backend");
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> HttpAgentClient {
    let config = ApiConfig::new(base_url).expect("valid test URL");
    // Keep loopback traffic away from any proxy configured in the environment
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build test client");
    HttpAgentClient::with_client(config, client)
}

async fn echo_chat(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    let message = body["message"].as_str().unwrap_or_default().to_string();
    captured.lock().unwrap().push(body);
    Json(json!({
        "response": format!("You said: {message}"),
        "metadata": {"requires_human": false}
    }))
}

mod chat_endpoint {
    use super::*;

    #[tokio::test]
    async fn posts_message_with_fixed_agent() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/chat/", post(echo_chat))
            .with_state(captured.clone());
        let base = spawn_backend(router).await;

        let reply = client_for(&base)
            .send_chat("What are your prices?")
            .await
            .expect("chat reply");

        assert_eq!(reply.response, "You said: What are your prices?");
        assert_eq!(reply.metadata.map(|m| m.requires_human), Some(false));
        assert_eq!(
            *captured.lock().unwrap(),
            vec![json!({"message": "What are your prices?", "agent_id": 1})]
        );
    }

    #[tokio::test]
    async fn base_url_path_is_preserved() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/api/chat/", post(echo_chat))
            .with_state(captured.clone());
        let base = spawn_backend(router).await;

        let reply = client_for(&format!("{base}/api"))
            .send_chat("hi")
            .await
            .expect("chat reply");

        assert_eq!(reply.response, "You said: hi");
    }

    #[tokio::test]
    async fn accepts_backend_metadata_field_name() {
        let router = Router::new().route(
            "/chat/",
            post(|| async {
                Json(json!({
                    "response": "Transfer to human agent",
                    "metadata_info": {"requires_human": true, "reason": "booking"}
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let reply = client_for(&base).send_chat("Book me in").await.unwrap();

        assert!(reply.metadata.unwrap().requires_human);
    }

    #[tokio::test]
    async fn server_error_is_a_status_failure() {
        let router = Router::new().route(
            "/chat/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is locked") }),
        );
        let base = spawn_backend(router).await;

        let err = client_for(&base).send_chat("hello").await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "database is locked");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let router = Router::new().route("/chat/", post(|| async { "not json" }));
        let base = spawn_backend(router).await;

        let err = client_for(&base).send_chat("hello").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .send_chat("hello")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}

mod history_endpoint {
    use super::*;

    #[tokio::test]
    async fn lists_records_in_server_order() {
        let router = Router::new().route(
            "/chat/history/",
            get(|| async {
                Json(json!([
                    {
                        "id": 2,
                        "agent_id": 1,
                        "message": "Can I book a repair?",
                        "response": "Transfer to human agent",
                        "created_at": "2024-03-05T15:00:00",
                        "metadata_info": {"requires_human": true}
                    },
                    {
                        "id": 1,
                        "agent_id": 1,
                        "message": "What are your prices?",
                        "response": "Basic: $20/month\nPremium: $45/month",
                        "created_at": "2024-03-05T14:07:09.123456",
                        "metadata_info": null
                    }
                ]))
            }),
        );
        let base = spawn_backend(router).await;

        let records = client_for(&base).fetch_history().await.expect("history");

        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(records[0].requires_human());
        assert!(!records[1].requires_human());
        assert_eq!(records[1].response, "Basic: $20/month\nPremium: $45/month");
    }

    #[tokio::test]
    async fn empty_history() {
        let router = Router::new().route("/chat/history/", get(|| async { Json(json!([])) }));
        let base = spawn_backend(router).await;

        let records = client_for(&base).fetch_history().await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_a_failure() {
        let router = Router::new();
        let base = spawn_backend(router).await;

        let err = client_for(&base).fetch_history().await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 404));
    }
}
