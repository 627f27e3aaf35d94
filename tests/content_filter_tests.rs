use portfolio_contact::{
    sanitizer::{sanitize_input, sanitize_multiline},
    spam_filter::SpamFilter,
};

#[test]
fn script_tag_is_escaped() {
    assert_eq!(sanitize_input("<script>"), "&lt;script&gt;");
}

#[test]
fn quotes_are_escaped_and_whitespace_trimmed() {
    assert_eq!(
        sanitize_input("  say \"hi\" it's me  "),
        "say &quot;hi&quot; it&#x27;s me"
    );
}

#[test]
fn sanitizing_twice_never_reintroduces_markup() {
    let once = sanitize_input(r#"<img src="x" onerror='alert(1)'>"#);
    let twice = sanitize_input(&once);

    for raw in ['<', '>', '"', '\''] {
        assert!(!once.contains(raw));
        assert!(!twice.contains(raw));
    }
    assert_eq!(once, twice);
}

#[test]
fn plain_text_is_untouched() {
    assert_eq!(sanitize_input("Hello, world & friends"), "Hello, world & friends");
}

#[test]
fn multiline_text_keeps_line_breaks() {
    assert_eq!(
        sanitize_multiline("line one\r\nline <two>\nthree"),
        "line one<br>line &lt;two&gt;<br>three"
    );
}

#[test]
fn viagra_is_flagged_in_any_case_and_context() {
    let filter = SpamFilter::default();

    assert!(filter.is_spam("viagra"));
    assert!(filter.is_spam("Buy VIAGRA now"));
    assert!(filter.is_spam("cheapViAgRaforyou"));
}

#[test]
fn every_default_keyword_is_flagged() {
    let filter = SpamFilter::default();

    for text in [
        "Visit our casino",
        "You won the lottery",
        "You are a WINNER",
        "Please Click Here to continue",
        "free money for everyone",
        "invest in crypto today",
    ] {
        assert!(filter.is_spam(text), "{text}");
    }
}

#[test]
fn clean_message_is_not_flagged() {
    let filter = SpamFilter::default();

    assert!(!filter.is_spam("Hi, I'd love to talk about a backend role at our company."));
    assert_eq!(filter.matched_keyword("Let's schedule a call next week."), None);
}

#[test]
fn substring_match_has_no_word_boundary() {
    let filter = SpamFilter::default();

    assert_eq!(filter.matched_keyword("I study cryptography"), Some("crypto"));
}

#[test]
fn custom_keywords_are_normalized() {
    let filter = SpamFilter::new(["  Cheap Pills ", ""]);

    assert!(filter.is_spam("get cheap pills here"));
    assert!(!filter.is_spam("a perfectly normal message"));
    assert!(!filter.is_spam("viagra"));
}
