use domain::{
    format_comment, Author, Comment, CommentId, CommentTranslations, DeliveryError, IssueNumber,
    Notification, NotificationSender, ParentIssue, RepositoryId, Timestamp,
};
use notify::{DiscordWebhookSender, MisskeySender};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notification() -> Notification {
    let comment = Comment {
        id: CommentId::new(77),
        body: "Reproduced on 1.2.3".into(),
        created_at: Timestamp::parse_rfc3339("2024-06-15T10:05:00Z").unwrap(),
        author: Author {
            login: "hubot".into(),
            avatar_url: "https://avatars.githubusercontent.com/u/2".into(),
        },
        html_url: "https://github.com/o/r/issues/5#issuecomment-77".into(),
        issue_url: "https://api.github.com/repos/o/r/issues/5".into(),
    };
    let parent = ParentIssue {
        number: IssueNumber::new(5),
        title: "Crash on start".into(),
        html_url: "https://github.com/o/r/issues/5".into(),
    };
    format_comment(
        &RepositoryId::new("o/r").unwrap(),
        &comment,
        Some(&parent),
        &CommentTranslations::default(),
    )
}

#[tokio::test]
async fn discord_posts_one_embed_per_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/webhooks/1/abc"))
        .and(body_partial_json(json!({
            "embeds": [{ "title": "New comment on #5: Crash on start", "color": 0x3498DB }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sender = DiscordWebhookSender::new(format!("{}/api/webhooks/1/abc", server.uri()));
    sender.send(&notification()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["embeds"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn discord_rejection_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("You are being rate limited."))
        .mount(&server)
        .await;

    let sender = DiscordWebhookSender::new(format!("{}/api/webhooks/1/abc", server.uri()));
    let err = sender.send(&notification()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Status { status: 429, .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_destination_is_a_transport_error() {
    // Nothing listens on port 1.
    let sender = DiscordWebhookSender::new("http://127.0.0.1:1/api/webhooks/1/abc");
    let err = sender.send(&notification()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn misskey_creates_note_in_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes/create"))
        .and(body_partial_json(json!({ "i": "token-1", "channelId": "chan-9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "createdNote": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = MisskeySender::new(format!("{}/", server.uri()), "token-1", "chan-9");
    sender.send(&notification()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("[Comment] New comment on #5: Crash on start"));
    assert!(text.contains("Reproduced on 1.2.3"));
    assert!(text.contains("https://github.com/o/r/issues/5#issuecomment-77"));
}
