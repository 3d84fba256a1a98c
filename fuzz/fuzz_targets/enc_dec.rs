#![no_main]
use libfuzzer_sys::fuzz_target;
use url_canon::pct_enc::{
    self,
    encoder::{Form, Structural},
    table::UNRESERVED,
};

fuzz_target!(|data: &[u8]| {
    let s = pct_enc::encode::<Structural>(data);
    assert!(UNRESERVED.or_pct_encoded().validate(s.as_bytes()));
    assert_eq!(data, &*pct_enc::decode::<Structural>(&s));

    let s = pct_enc::encode::<Form>(data);
    assert_eq!(data, &*pct_enc::decode::<Form>(&s));

    if let Ok(text) = std::str::from_utf8(data) {
        let normalized = pct_enc::normalize_component(text);
        assert_eq!(normalized, pct_enc::normalize_component(&normalized));
    }
});
