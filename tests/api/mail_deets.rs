use crate::helpers::{spawn_app, spawn_app_with_failing_mailer};
use fake::Fake;
use fake::faker::address::en::{CityName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use yome_mailer::NOTIFICATION_SUBJECT;

#[tokio::test]
async fn mail_deets_returns_a_200_with_a_json_content_type() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_mail_deets_fields(&[
            ("name", "Jo"),
            ("email", "jo@x.com"),
            ("city", "Reno"),
            ("zip", "89501"),
            ("comments", ""),
            ("code", "abc123"),
        ])
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .expect("Missing content type"),
        "application/json"
    );
}

#[tokio::test]
async fn mail_deets_forwards_the_submission_in_the_notification_body() {
    // Arrange
    let app = spawn_app().await;

    // Act
    app.post_mail_deets_fields(&[
        ("name", "Jo"),
        ("email", "jo@x.com"),
        ("city", "Reno"),
        ("zip", "89501"),
        ("comments", ""),
        ("code", "abc123"),
    ])
    .await;

    // Assert
    let email = app.single_sent_email().await;
    assert!(email.has_line(&format!("Subject: {}", NOTIFICATION_SUBJECT)));
    assert!(email.has_line("A New Yome Request!!"));
    assert!(email.has_line("Name:     Jo"));
    assert!(email.has_line("Email:    jo@x.com"));
    assert!(email.has_line("City:     Reno"));
    assert!(email.has_line("ZIP Code: 89501"));
    assert_eq!(
        email.yome_link(),
        "http://redskyshelters.com/calculator/#!/yome/abc123"
    );
}

#[tokio::test]
async fn mail_deets_always_notifies_the_same_recipients() {
    // Arrange
    let app = spawn_app().await;
    let submitter: String = SafeEmail().fake();

    // Act
    app.post_mail_deets_fields(&[("email", submitter.as_str())]).await;

    // Assert
    let email = app.single_sent_email().await;
    let recipients: Vec<String> = email.envelope.to().iter().map(|a| a.to_string()).collect();
    assert_eq!(
        recipients,
        vec!["bhauman@gmail.com", "redskyshelters@gmail.com"]
    );
    assert_eq!(
        email.envelope.from().map(|a| a.to_string()),
        Some("bhauman@gmail.com".to_string())
    );
}

#[tokio::test]
async fn mail_deets_returns_a_200_and_sends_mail_when_the_body_is_empty() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_mail_deets(String::new()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let email = app.single_sent_email().await;
    assert!(email.has_line("Name:     "));
    assert!(email.has_line("Email:    "));
    assert!(email.has_line("City:     "));
    assert!(email.has_line("ZIP Code: "));
    assert_eq!(
        email.yome_link(),
        "http://redskyshelters.com/calculator/#!/yome/"
    );
}

#[tokio::test]
async fn mail_deets_returns_a_200_when_fields_are_missing() {
    let app = spawn_app().await;

    let test_cases = vec![
        ("name=Jo", "only a name"),
        ("email=jo%40x.com&code=abc123", "no name, city or zip"),
        ("comments=just%20curious", "only comments"),
        ("colour=red", "only an unknown field"),
    ];

    for (body, description) in test_cases {
        let response = app.post_mail_deets(body.to_string()).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "The API did not return a 200 OK when the payload had {}.",
            description
        );
    }
    assert_eq!(app.sent_emails().await.len(), 4);
}

#[tokio::test]
async fn mail_deets_sends_one_email_per_submission() {
    // Arrange
    let app = spawn_app().await;

    // Act
    for _ in 0..3 {
        let name: String = Name().fake();
        let city: String = CityName().fake();
        let zip: String = ZipCode().fake();
        let comments: String = Sentence(3..6).fake();
        app.post_mail_deets_fields(&[
            ("name", name.as_str()),
            ("city", city.as_str()),
            ("zip", zip.as_str()),
            ("comments", comments.as_str()),
        ])
        .await;
    }

    // Assert
    assert_eq!(app.sent_emails().await.len(), 3);
}

#[tokio::test]
async fn mail_deets_links_to_the_posted_yome_code() {
    // Arrange
    let app = spawn_app().await;
    let code = "6ad19c0e-kitchen-2door";

    // Act
    app.post_mail_deets_fields(&[("name", "Jo"), ("code", code)])
        .await;

    // Assert
    let email = app.single_sent_email().await;
    assert_eq!(
        email.yome_link(),
        format!("http://redskyshelters.com/calculator/#!/yome/{}", code)
    );
}

#[tokio::test]
async fn mail_deets_returns_a_500_when_the_mail_relay_fails() {
    // Arrange
    let app = spawn_app_with_failing_mailer().await;

    // Act
    let response = app
        .post_mail_deets_fields(&[("name", "Jo"), ("code", "abc123")])
        .await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn mail_deets_treats_a_bare_post_as_an_empty_submission() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .post(format!("{}/mail/deets", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, response.status().as_u16());
    let email = app.single_sent_email().await;
    assert!(email.has_line("Name:     "));
}

#[tokio::test]
async fn mail_deets_accepts_comments_longer_than_the_default_form_limit() {
    // Arrange
    let app = spawn_app().await;
    let comments = "x".repeat(20_000);

    // Act
    let response = app
        .post_mail_deets_fields(&[("name", "Jo"), ("comments", comments.as_str())])
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.sent_emails().await.len(), 1);
}

