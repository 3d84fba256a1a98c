#![no_main]
use libfuzzer_sys::fuzz_target;
use url_canon::{query::MAX_DEPTH, UrlQuery};

fuzz_target!(|data: &str| {
    let q1 = UrlQuery::parse(data);
    for (_, value) in q1.fields() {
        assert!(value.depth() <= MAX_DEPTH);
    }

    // Composition is stable after one round.
    let s1 = q1.query_string();
    let s2 = UrlQuery::parse(&s1).query_string();
    assert_eq!(s1, s2);

    let sorted = q1.to_query_string(true);
    assert_eq!(sorted.len(), s1.len());
});
