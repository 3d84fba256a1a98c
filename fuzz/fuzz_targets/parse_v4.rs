#![no_main]
use libfuzzer_sys::fuzz_target;
use std::net::Ipv4Addr;
use std::str::FromStr;
use url_canon::{component::Host, Url};

fuzz_target!(|data: &str| {
    if data.contains(['/', '?', '#', '@', ':', '[']) || data.is_empty() {
        return;
    }
    assert_eq!(url_canon::validate::is_valid_ipv4(data), Ipv4Addr::from_str(data).is_ok());
    assert_eq!(parse_v4(data), Ipv4Addr::from_str(data).ok());
});

fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    let s = format!("http://user@{s}:81/");
    match Url::parse(&s).ok()?.host_parsed() {
        Host::Ipv4(addr) => Some(addr),
        _ => None,
    }
}
