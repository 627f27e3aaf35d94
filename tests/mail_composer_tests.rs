use chrono::{TimeZone, Utc};
use portfolio_contact::{
    entities::{contact::Submission, mail::Sender},
    mail_composer::MailComposer,
};

fn composer() -> MailComposer {
    MailComposer::new(
        Sender {
            name: "Portfolio Contact Form".to_string(),
            address: "mailer@example.com".to_string(),
        },
        "owner@example.com",
    )
}

fn submission(subject: Option<&str>) -> Submission {
    Submission {
        name: "Jo <b>Bold</b>".to_string(),
        email: "jo@x.com".to_string(),
        subject: subject.map(str::to_string),
        message: "Hello \"there\"\n<script>alert('x')</script>".to_string(),
    }
}

#[test]
fn notification_subject_uses_given_subject() {
    let mail = composer().notification(&submission(Some("Job offer")), "203.0.113.7", Utc::now());

    assert_eq!(mail.subject, "Portfolio Contact: Job offer");
}

#[test]
fn notification_subject_falls_back_to_sender_name() {
    let mail = composer().notification(&submission(None), "203.0.113.7", Utc::now());

    assert_eq!(mail.subject, "Portfolio Contact: New message from Jo <b>Bold</b>");
}

#[test]
fn notification_goes_to_operator_with_reply_to_sender() {
    let mail = composer().notification(&submission(None), "203.0.113.7", Utc::now());

    assert_eq!(mail.recipient, "owner@example.com");
    assert_eq!(mail.reply_to.as_deref(), Some("jo@x.com"));
    assert_eq!(mail.sender.address, "mailer@example.com");
}

#[test]
fn notification_text_lists_fields_time_and_address() {
    let received = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
    let mail = composer().notification(&submission(Some("Job offer")), "203.0.113.7", received);

    assert!(mail.text_body.contains("Name: Jo <b>Bold</b>"));
    assert!(mail.text_body.contains("Email: jo@x.com"));
    assert!(mail.text_body.contains("Subject: Job offer"));
    assert!(mail.text_body.contains("<script>alert('x')</script>"));
    assert!(mail.text_body.contains(&received.to_rfc2822()));
    assert!(mail.text_body.contains("203.0.113.7"));
}

#[test]
fn notification_html_never_contains_raw_user_markup() {
    let mail = composer().notification(&submission(Some("<i>hi</i>")), "203.0.113.7", Utc::now());

    assert!(!mail.html_body.contains("<script>"));
    assert!(!mail.html_body.contains("<b>Bold</b>"));
    assert!(!mail.html_body.contains("<i>hi</i>"));
    assert!(mail.html_body.contains("Jo &lt;b&gt;Bold&lt;/b&gt;"));
    assert!(mail.html_body.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    assert!(mail.html_body.contains("Hello &quot;there&quot;<br>"));
}

#[test]
fn acknowledgement_greets_sender_and_is_marked_automated() {
    let mail = composer().acknowledgement(&submission(None));

    assert_eq!(mail.recipient, "jo@x.com");
    assert_eq!(mail.reply_to, None);
    assert_eq!(mail.subject, "Thank you for contacting me!");
    assert!(mail.text_body.starts_with("Hi Jo <b>Bold</b>,"));
    assert!(mail.text_body.contains("24-48 hours"));
    assert!(mail.text_body.contains("automated"));
    assert!(mail.html_body.contains("Hi Jo &lt;b&gt;Bold&lt;/b&gt;,"));
    assert!(mail.html_body.contains("automated"));
    assert!(!mail.html_body.contains("<b>Bold</b>"));
}

#[test]
fn compose_builds_both_messages() {
    let mail = composer().compose(&submission(None), "203.0.113.7", Utc::now());

    assert_eq!(mail.notification.recipient, "owner@example.com");
    assert_eq!(mail.acknowledgement.recipient, "jo@x.com");
}
