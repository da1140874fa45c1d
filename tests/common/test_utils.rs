use axum_test::TestServer;
use image_qa::{
    config::LlmConfig,
    llm::VisionClient,
    server::{handlers::AppState, router},
};
use serde_json::json;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;

/// Smallest valid PNG header; the server never decodes the image.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

pub const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;

pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        provider: "openai".to_string(),
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        system_prompt: None,
        temperature: Some(0.0),
        max_tokens: None,
        timeout_secs: Some(5),
    }
}

pub fn create_test_server(client: Arc<dyn VisionClient>, docs_dir: &Path) -> TestServer {
    let state = AppState {
        client,
        docs_dir: docs_dir.to_path_buf(),
        system_prompt: None,
    };
    TestServer::new(router(state, TEST_UPLOAD_LIMIT)).expect("Failed to start test server")
}

/// Temporary docs directory holding every allow-listed file plus one that is not.
pub fn create_docs_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("README.md"), "# image-qa\n").unwrap();
    std::fs::write(dir.path().join("API.md"), "# API\n\nPOST /api/ask\n").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "do not serve").unwrap();
    dir
}

pub fn questions_json(questions: &[&str]) -> String {
    json!(questions).to_string()
}

/// Minimal OpenAI chat-completion body whose single choice carries `content`.
pub fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}
