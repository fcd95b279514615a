use domain::{TranslationError, Translator};
use serde_json::json;
use translator::DeepLTranslator;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn posts_one_fragment_and_returns_translation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("authorization", "DeepL-Auth-Key key:fx"))
        .and(body_string_contains("target_lang=JA"))
        .and(body_string_contains("text=Crash+on+start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [{ "detected_source_language": "EN", "text": "起動時にクラッシュ" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = DeepLTranslator::new("key:fx", "JA").with_endpoint(server.uri());
    let text = translator.translate("Crash on start").await.unwrap();
    assert_eq!(text, "起動時にクラッシュ");
}

#[tokio::test]
async fn quota_error_is_reported_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(456).set_body_string("Quota exceeded"))
        .mount(&server)
        .await;

    let translator = DeepLTranslator::new("key", "JA").with_endpoint(server.uri());
    let err = translator.translate("hello").await.unwrap_err();
    assert!(matches!(err, TranslationError::Status { status: 456, .. }), "{err:?}");
}

#[tokio::test]
async fn empty_translation_list_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translations": [] })))
        .mount(&server)
        .await;

    let translator = DeepLTranslator::new("key", "JA").with_endpoint(server.uri());
    let err = translator.translate("hello").await.unwrap_err();
    assert!(matches!(err, TranslationError::EmptyResponse));
}
