use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tiger_relay::config::{Config, Provider};
use tiger_relay::relay::Relay;
use tiger_relay::server;

/// Relay with no credentials configured: every provider path answers with a
/// configuration error instead of touching the network.
fn offline_relay() -> Relay {
    Relay::new(&Config::default())
}

#[tokio::test]
async fn use_claude_routes_next_message_to_anthropic() {
    let relay = offline_relay();

    let ack = relay.handle("/use claude").await.unwrap();
    assert!(ack.contains("anthropic"));

    let state = relay.session().snapshot();
    assert_eq!(state.provider, Provider::Anthropic);
    assert_eq!(state.model, Provider::Anthropic.default_model());

    // The follow-up message reaches the Anthropic adapter, which reports its
    // missing credential rather than calling out.
    let reply = relay.handle("hello there").await.unwrap();
    assert!(reply.contains("ANTHROPIC_API_KEY"));
    assert!(!reply.contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn unknown_provider_leaves_session_untouched() {
    let relay = offline_relay();
    let before = relay.session().snapshot();

    let reply = relay.handle("/use hal9000").await.unwrap();
    assert!(reply.contains("openai"));
    assert!(reply.contains("anthropic"));
    assert!(reply.contains("gemini"));

    assert_eq!(relay.session().snapshot(), before);
}

#[tokio::test]
async fn model_command_is_verbatim_and_keeps_provider() {
    let relay = offline_relay();

    relay.handle("/model custom-x").await.unwrap();

    let state = relay.session().snapshot();
    assert_eq!(state.provider, Provider::OpenAI);
    assert_eq!(state.model, "custom-x");
}

#[tokio::test]
async fn command_works_as_last_turn_of_a_json_history() {
    let relay = offline_relay();
    let body = r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"},{"role":"user","content":"/use gemini"}]"#;

    let ack = relay.handle(body).await.unwrap();
    assert!(ack.contains("gemini"));
    assert_eq!(relay.session().snapshot().provider, Provider::Gemini);
}

#[tokio::test]
async fn missing_credential_is_reported_as_reply_text() {
    let relay = offline_relay();
    let reply = relay.handle("what year is it?").await.unwrap();
    assert!(reply.contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn unrecognized_slash_text_is_routed_like_any_message() {
    let relay = offline_relay();

    // Routed to the default provider, so the reply names its missing key.
    let reply = relay.handle("/usefulness of ferrets").await.unwrap();
    assert!(reply.contains("OPENAI_API_KEY"));
    assert_eq!(relay.session().snapshot().provider, Provider::OpenAI);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_commands_never_tear_the_session() {
    let relay = Arc::new(offline_relay());
    let mut handles = Vec::new();

    for i in 0..100 {
        let switcher = relay.clone();
        handles.push(tokio::spawn(async move {
            let cmd = match i % 3 {
                0 => "/use openai",
                1 => "/use claude",
                _ => "/use gemini",
            };
            switcher.handle(cmd).await.unwrap();
        }));

        // No /model command is ever issued here, so any snapshot must pair a
        // provider with that provider's own default model.
        let reader = relay.clone();
        handles.push(tokio::spawn(async move {
            let state = reader.session().snapshot();
            assert_eq!(state.model, state.provider.default_model());
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn http_command_ack_is_plain_text_200() {
    let app = server::router(Arc::new(offline_relay()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::from("/use gemini"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("gemini"));
}

#[tokio::test]
async fn http_provider_config_error_is_still_a_200_reply() {
    let app = server::router(Arc::new(offline_relay()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::from("hello"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = server::router(Arc::new(offline_relay()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}
