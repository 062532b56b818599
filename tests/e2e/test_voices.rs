use crate::e2e::helpers;

use assistant_voice::domain::speech::SpeechServiceError;
use assistant_voice::domain::voices::{VoiceCatalogService, VoiceFilter};
use helpers::fake_speechify::{voice_json, SpeechReply};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use test_context::test_context;

fn seed_catalog(ctx: &TestContext) {
    ctx.speechify.set_voices(vec![
        voice_json("george", "male", &["en-US"], &["timbre:deep", "use-case:advertisement"]),
        voice_json("lisa", "female", &["en-GB", "en-US"], &["timbre:bright"]),
        voice_json("henri", "male", &["fr-FR"], &["timbre:deep"]),
    ]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_voices_by_gender(ctx: &TestContext) {
    seed_catalog(ctx);
    let catalog = ctx.catalog();

    let all = catalog.filter_voices(&VoiceFilter::default()).await;
    assert_eq!(all.len(), 6);

    let female = catalog
        .filter_voices(&VoiceFilter {
            gender: Some("Female".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(female, vec!["simba-english", "simba-multilingual"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_voices_by_locale_and_tags(ctx: &TestContext) {
    seed_catalog(ctx);
    let catalog = ctx.catalog();

    let models = catalog
        .filter_voices(&VoiceFilter {
            gender: None,
            locale: Some("en-US".to_string()),
            tags: vec!["timbre:deep".to_string()],
        })
        .await;

    assert_eq!(models, vec!["simba-english", "simba-multilingual"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_validate_voice_ids(ctx: &TestContext) {
    seed_catalog(ctx);
    let catalog = ctx.catalog();

    assert!(catalog.is_valid_voice("henri").await);
    assert!(!catalog.is_valid_voice("nobody").await);
    assert!(!catalog.is_valid_voice("").await);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_catalog_without_credential(ctx: &TestContext) {
    seed_catalog(ctx);
    let mut config = ctx.config.clone();
    config.speechify_token = None;
    let catalog = VoiceCatalogService::new(ctx.repository_with(&config));

    assert!(catalog.list_voices().await.is_empty());
    assert!(!catalog.is_valid_voice("george").await);
    // Never reached the API
    assert_eq!(ctx.speechify.voice_requests(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_catalog_on_api_error(ctx: &TestContext) {
    seed_catalog(ctx);
    ctx.speechify.fail_voices(500);
    let catalog = ctx.catalog();

    assert!(catalog.list_voices().await.is_empty());
    assert!(catalog.filter_voices(&VoiceFilter::default()).await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voices_for_a_language(ctx: &TestContext) {
    seed_catalog(ctx);
    let catalog = ctx.catalog();

    let english = catalog.list_voices_by_language("en-US").await;
    let ids: Vec<&str> = english.iter().map(|v| v.voice_id.as_str()).collect();
    assert_eq!(ids, vec!["george", "lisa"]);
    assert_eq!(english[1].gender, "female");

    assert!(catalog.list_voices_by_language("ja-JP").await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_audition_a_voice_into_a_file(ctx: &TestContext) {
    ctx.speechify.script(vec![SpeechReply::Audio(b"sample".to_vec())]);
    let catalog = ctx.catalog();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test_audio.mp3");

    assert!(catalog.audition_voice("de-DE-klaus", "Guten Tag", &output).await);
    assert_eq!(std::fs::read(&output).unwrap(), b"sample".to_vec());

    let requests = ctx.speechify.speech_requests();
    assert_eq!(requests[0]["voice_id"], "de-DE-klaus");
    assert_eq!(requests[0]["language"], "de-DE");
    assert_eq!(requests[0]["model"], "simba-multilingual");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_failed_audition(ctx: &TestContext) {
    ctx.speechify.script(vec![SpeechReply::Status(500, "boom".to_string())]);
    let catalog = ctx.catalog();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test_audio.mp3");

    assert!(!catalog.audition_voice("george", "Hello", &output).await);
    assert!(!output.exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_audition_errors_by_kind(ctx: &TestContext) {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test_audio.mp3");

    let mut config = ctx.config.clone();
    config.speechify_token = Some("wrong".to_string());
    let rejected = VoiceCatalogService::new(ctx.repository_with(&config));
    let err = rejected
        .try_audition_voice("george", "Hello", &output)
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechServiceError::Authentication(_)));

    let missing_dir = dir.path().join("missing").join("test_audio.mp3");
    let err = ctx
        .catalog()
        .try_audition_voice("george", "Hello", &missing_dir)
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechServiceError::Scratch(_)));
}
