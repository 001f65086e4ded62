//! Live tests against the real Gemini API.
//!
//! Run with `cargo test -- --ignored` and a valid key in the
//! environment.

use gemini_adapter::{init, GeminiClient, GeminiConfig, RequestSpec};

#[tokio::test]
#[ignore = "Requires GEMINI_API_KEY environment variable"]
async fn test_live_init_probe_reaches_model() {
    let (_, report) = init(None, None).await.expect("credential discovery");
    assert!(report.reachable, "probe failed: {}", report.detail);
    assert!(report.supports_generation);
}

#[tokio::test]
#[ignore = "Requires GEMINI_API_KEY environment variable"]
async fn test_live_text_generation() {
    let key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY");
    let client = GeminiClient::new(GeminiConfig::new(key)).expect("client");
    let text = client
        .generate(RequestSpec {
            prompt: "Reply with the single word: pong",
            ..RequestSpec::default()
        })
        .await
        .expect("generation");
    assert!(!text.is_empty());
}
