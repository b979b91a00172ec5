//! Provider integration tests with mocked network responses.
//!
//! These tests use wiremock to stand in for an OpenAI-compatible API and
//! validate:
//! - Request/response wiring for the embeddings endpoint
//! - Out-of-order embedding responses being restored to input order
//! - Batching across multiple requests
//! - Chat completion parsing
//! - Error handling for non-2xx responses and malformed payloads

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vade::llm::{LlmClient, OpenAiClient};
use vade::rag::embeddings::OpenAiEmbeddings;
use vade::rag::EmbeddingProvider;
use vade::types::AppError;
use vade::utils::config::{EmbeddingConfig, LlmConfig};

// ============= Helper Functions =============

/// Embedding config pointed at the mock server.
fn embedding_config(server: &MockServer, key_env: &str, dimensions: usize) -> EmbeddingConfig {
    std::env::set_var(key_env, "test-key");
    EmbeddingConfig {
        api_base: server.uri(),
        api_key_env: key_env.to_string(),
        dimensions,
        ..EmbeddingConfig::default()
    }
}

/// LLM config pointed at the mock server.
fn llm_config(server: &MockServer, key_env: &str) -> LlmConfig {
    std::env::set_var(key_env, "test-key");
    LlmConfig {
        api_base: server.uri(),
        api_key_env: key_env.to_string(),
        ..LlmConfig::default()
    }
}

/// Build an embeddings response with explicit (index, vector) entries.
fn embeddings_body(entries: &[(usize, Vec<f32>)]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = entries
        .iter()
        .map(|(index, embedding)| json!({"index": index, "embedding": embedding}))
        .collect();
    json!({"object": "list", "data": data})
}

fn chat_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ]
    })
}

// ============= Embedding Provider Tests =============

#[tokio::test]
async fn test_embeddings_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(embeddings_body(&[(0, vec![0.1, 0.2, 0.3])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = embedding_config(&server, "VADE_TEST_EMBED_KEY_RT", 3);
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let vector = provider.embed("license renewal").await.unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embeddings_out_of_order_response_is_reordered() {
    let server = MockServer::start().await;

    // The entry for input 1 comes first; the client must restore input order
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[
            (1, vec![1.0, 1.0, 1.0]),
            (0, vec![0.0, 0.0, 0.0]),
        ])))
        .mount(&server)
        .await;

    let config = embedding_config(&server, "VADE_TEST_EMBED_KEY_ORDER", 3);
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let texts = vec!["first".to_string(), "second".to_string()];
    let vectors = provider.embed_many(&texts).await.unwrap();
    assert_eq!(vectors[0], vec![0.0, 0.0, 0.0]);
    assert_eq!(vectors[1], vec![1.0, 1.0, 1.0]);
}

#[tokio::test]
async fn test_embeddings_batches_split_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({"input": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[
            (0, vec![1.0, 0.0, 0.0]),
            (1, vec![0.0, 1.0, 0.0]),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({"input": ["c"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(embeddings_body(&[(0, vec![0.0, 0.0, 1.0])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = embedding_config(&server, "VADE_TEST_EMBED_KEY_BATCH", 3);
    config.batch_size = 2;
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let vectors = provider.embed_many(&texts).await.unwrap();
    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors[2], vec![0.0, 0.0, 1.0]);
}

#[tokio::test]
async fn test_embeddings_length_mismatch_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(embeddings_body(&[(0, vec![0.1, 0.2, 0.3])])),
        )
        .mount(&server)
        .await;

    let config = embedding_config(&server, "VADE_TEST_EMBED_KEY_LEN", 3);
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let texts = vec!["first".to_string(), "second".to_string()];
    let err = provider.embed_many(&texts).await.unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
}

#[tokio::test]
async fn test_embeddings_wrong_dimensions_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(embeddings_body(&[(0, vec![0.1, 0.2])])),
        )
        .mount(&server)
        .await;

    let config = embedding_config(&server, "VADE_TEST_EMBED_KEY_DIMS", 3);
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let err = provider.embed("text").await.unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
}

#[tokio::test]
async fn test_embeddings_http_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let config = embedding_config(&server, "VADE_TEST_EMBED_KEY_HTTP", 3);
    let provider = OpenAiEmbeddings::new(&config).unwrap();

    let err = provider.embed("text").await.unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
    assert!(err.to_string().contains("500"));
}

// ============= Chat Completion Tests =============

#[tokio::test]
async fn test_chat_completion_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body("Renew online or by mail.")),
        )
        .mount(&server)
        .await;

    let config = llm_config(&server, "VADE_TEST_LLM_KEY_RT");
    let client = OpenAiClient::new(&config).unwrap();

    let answer = client
        .generate_with_system("You answer from context.", "How do I renew?")
        .await
        .unwrap();
    assert_eq!(answer, "Renew online or by mail.");
}

#[tokio::test]
async fn test_chat_completion_without_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let config = llm_config(&server, "VADE_TEST_LLM_KEY_EMPTY");
    let client = OpenAiClient::new(&config).unwrap();

    let err = client.generate_with_system("system", "prompt").await.unwrap_err();
    assert!(matches!(err, AppError::Llm(_)));
}

#[tokio::test]
async fn test_chat_completion_auth_failure_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let config = llm_config(&server, "VADE_TEST_LLM_KEY_AUTH");
    let client = OpenAiClient::new(&config).unwrap();

    let err = client.generate_with_system("system", "prompt").await.unwrap_err();
    assert!(matches!(err, AppError::Llm(_)));
    assert!(err.to_string().contains("401"));
}
