//! End-to-end generate-or-fallback runs against a mock endpoint

use crate::integration::mock_server::{closed_port_url, MockServerFixture, TEST_VOICE};
use std::fs;
use voiceover_rs::output::{FALLBACK_FILE, INSTRUCTIONS_FILE};
use voiceover_rs::{AudioRequestRunner, OutputArtifact, OutputLayout, SynthesisRequest, TtsClient};

const SCRIPT: &str = "🎯 Silver Price Update Today

💰 Current Price: $25.16 USD/oz
📈 24h Change: -0.86%

🔔 Follow for daily updates!";

#[tokio::test]
async fn test_success_saves_audio_and_instructions() {
    let mut fixture = MockServerFixture::new().await;
    let audio = vec![0xffu8, 0xfb, 0x90, 0x64, 0x00, 0x01, 0x02];
    let mock = fixture.mock_audio(TEST_VOICE, &audio).await;
    let layout = fixture.layout();
    let runner = AudioRequestRunner::new(fixture.client(), layout.clone());
    let mut console = Vec::new();

    let artifact = runner.run(&SynthesisRequest::new(SCRIPT), &mut console).await;

    mock.assert_async().await;
    assert!(artifact.is_audio());
    let audio_path = layout.audio_path(TEST_VOICE);
    assert_eq!(
        audio_path.file_name().unwrap(),
        "video_1_silver_tiktok_EXAVITQu4vr4xnSDxMaL.mp3"
    );
    assert_eq!(fs::read(&audio_path).unwrap(), audio);
    let instructions = fs::read_to_string(layout.dir().join(INSTRUCTIONS_FILE)).unwrap();
    assert!(instructions.contains(SCRIPT));
    assert!(!layout.dir().join(FALLBACK_FILE).exists());

    let printed = String::from_utf8(console).unwrap();
    assert!(printed.contains("Status Code: 200"));
    assert!(printed.contains("SUCCESS! Audio saved to"));
    assert!(printed.contains("File size: 0.01 KB"));
}

#[tokio::test]
async fn test_unauthorized_prints_guidance_and_writes_no_audio() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error(TEST_VOICE, 401, r#"{"error":"unauthorized"}"#)
        .await;
    let layout = fixture.layout();
    let runner = AudioRequestRunner::new(fixture.client(), layout.clone());
    let mut console = Vec::new();

    let artifact = runner.run(&SynthesisRequest::new(SCRIPT), &mut console).await;

    assert!(!layout.audio_path(TEST_VOICE).exists());
    let printed = String::from_utf8(console).unwrap();
    assert!(printed.contains("Status Code: 401"));
    let guidance = printed
        .split("FALLBACK INSTRUCTIONS:")
        .nth(1)
        .expect("guidance block");
    assert!(!guidance.trim().is_empty());
    match artifact {
        OutputArtifact::Fallback { status_code, .. } => assert_eq!(status_code, Some(401)),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_writes_one_fallback_file() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(tmp.path().join("voiceover_output"), "video_1_silver_tiktok");
    let client = TtsClient::builder()
        .api_key("k")
        .base_url(closed_port_url())
        .timeout_secs(2)
        .build()
        .unwrap();
    let runner = AudioRequestRunner::new(client, layout.clone());
    let mut console = Vec::new();

    let artifact = runner.run(&SynthesisRequest::new(SCRIPT), &mut console).await;

    let files: Vec<_> = fs::read_dir(layout.dir())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(files, vec![std::ffi::OsString::from(FALLBACK_FILE)]);
    let text = fs::read_to_string(layout.dir().join(FALLBACK_FILE)).unwrap();
    assert!(text.contains(SCRIPT));
    assert!(matches!(
        artifact,
        OutputArtifact::Fallback {
            status_code: None,
            ..
        }
    ));
}

#[tokio::test]
async fn test_existing_output_dir_is_reused() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_audio(TEST_VOICE, b"audio").await;
    let layout = fixture.layout();
    fs::create_dir_all(layout.dir()).unwrap();
    let earlier = layout.dir().join("earlier_take.mp3");
    fs::write(&earlier, b"keep me").unwrap();
    let runner = AudioRequestRunner::new(fixture.client(), layout.clone());

    runner
        .run(&SynthesisRequest::new(SCRIPT), &mut std::io::sink())
        .await;

    assert_eq!(fs::read(&earlier).unwrap(), b"keep me");
    assert!(layout.audio_path(TEST_VOICE).exists());
}
