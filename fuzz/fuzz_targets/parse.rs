#![no_main]
use libfuzzer_sys::fuzz_target;
use url_canon::Url;

fuzz_target!(|data: &str| {
    let parsed = Url::parse(data);
    if Url::is_valid(data) {
        assert!(parsed.is_ok());
    }
    let Ok(u1) = parsed else {
        return;
    };

    let normalized = u1.normalized_url();
    assert!(normalized.starts_with(u1.normalized_url_without_fragment()));
    assert!(normalized.starts_with(u1.normalized_protocol()));

    let u2 = Url::parse(normalized).unwrap();

    assert_eq!(u1.normalized_protocol(), u2.normalized_protocol());
    assert_eq!(u1.normalized_host(), u2.normalized_host());
    assert_eq!(u1.host_is_bracketed(), u2.host_is_bracketed());
    assert_eq!(u1.user(), u2.user());
    assert_eq!(u1.password(), u2.password());
    assert_eq!(u1.normalized_path(), u2.normalized_path());
    assert_eq!(u1.url_path(), u2.url_path());
    assert_eq!(u1.normalized_query_string(), u2.normalized_query_string());
    assert_eq!(u1.normalized_fragment(), u2.normalized_fragment());

    // Normalization is idempotent.
    assert_eq!(u1.normalized_url(), u2.normalized_url());
    assert!(u1.equals(&u2, false));
});
