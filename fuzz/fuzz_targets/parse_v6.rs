#![no_main]
use libfuzzer_sys::fuzz_target;
use std::net::Ipv6Addr;
use std::str::FromStr;
use url_canon::{component::Host, Url};

fuzz_target!(|data: &str| {
    assert_eq!(parse_v6(data), Ipv6Addr::from_str(data).ok());
});

fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    if s.contains([']', '/', '?', '#']) {
        return None;
    }
    let s = format!("http://[{s}]/");
    match Url::parse(&s).ok()?.host_parsed() {
        Host::Ipv6(addr) => Some(addr),
        _ => None,
    }
}
