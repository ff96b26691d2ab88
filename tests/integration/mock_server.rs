//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use voiceover_rs::{OutputLayout, TtsClient};

pub const TEST_API_KEY: &str = "test-key-0123456789";
pub const TEST_VOICE: &str = "EXAVITQu4vr4xnSDxMaL";

/// Test fixture that owns a mock server and a scratch output directory.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
    pub tmp: tempfile::TempDir,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server,
            base_url,
            tmp: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Client pointed at the mock server
    pub fn client(&self) -> TtsClient {
        TtsClient::builder()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .timeout_secs(5)
            .build()
            .expect("client")
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(self.tmp.path().join("voiceover_output"), "video_1_silver_tiktok")
    }

    pub fn speech_path(voice_id: &str) -> String {
        format!("/v1/text-to-speech/{}", voice_id)
    }

    /// Successful audio response; also checks the headers the endpoint relies on.
    pub async fn mock_audio(&mut self, voice_id: &str, audio: &[u8]) -> Mock {
        self.server
            .mock("POST", Self::speech_path(voice_id).as_str())
            .match_header("xi-api-key", TEST_API_KEY)
            .match_header("accept", "audio/mpeg")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(audio)
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error(&mut self, voice_id: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", Self::speech_path(voice_id).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock that only matches when the JSON body carries the given fields
    pub async fn mock_body_match(&mut self, voice_id: &str, expected: serde_json::Value) -> Mock {
        self.server
            .mock("POST", Self::speech_path(voice_id).as_str())
            .match_body(Matcher::PartialJson(expected))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await
    }
}

/// Base URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
