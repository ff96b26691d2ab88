//! HTTP client behavior against a mock endpoint

use crate::integration::mock_server::{closed_port_url, MockServerFixture, TEST_VOICE};
use voiceover_rs::tts::{SpeechSynthesizer, SynthesisRequest, SynthesisResult, TtsClient};
use voiceover_rs::Error;

#[tokio::test]
async fn test_fetch_audio_returns_body() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_audio(TEST_VOICE, b"ID3\x04\x00audio").await;

    let response = fixture
        .client()
        .fetch_audio(&SynthesisRequest::new("hello"))
        .await
        .expect("audio");

    assert_eq!(response.status, 200);
    assert_eq!(&response.body[..], b"ID3\x04\x00audio");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_body_carries_model_and_settings() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_body_match(
            "voice123",
            serde_json::json!({
                "text": "Support: $22.85",
                "model_id": "eleven_monolingual_v1",
                "voice_settings": { "stability": 0.5, "similarity_boost": 0.75 }
            }),
        )
        .await;

    let request = SynthesisRequest::new("Support: $22.85").with_voice_id("voice123");
    let result = fixture.client().synthesize(&request).await;

    assert!(result.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_maps_to_api_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error(TEST_VOICE, 401, r#"{"error":"unauthorized"}"#)
        .await;

    let err = fixture
        .client()
        .fetch_audio(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, r#"{"error":"unauthorized"}"#);
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    let client = TtsClient::builder()
        .api_key("k")
        .base_url(closed_port_url())
        .timeout_secs(2)
        .build()
        .unwrap();

    let result = client.synthesize(&SynthesisRequest::new("hello")).await;

    match result {
        SynthesisResult::Failure {
            status_code,
            message,
        } => {
            assert_eq!(status_code, None);
            assert!(message.contains("TTS request failed"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}
