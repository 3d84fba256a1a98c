use url_canon::{PathError, Url, UrlPath};

#[test]
fn segments() {
    let path = UrlPath::parse("/a/b/").unwrap();
    assert_eq!(path.num_components(), 3);
    assert!(path.components().eq(["a", "b", ""]));
    assert_eq!(path.path_string(), "/a/b/");

    let path: UrlPath = "/docs/read%20me.txt".parse().unwrap();
    assert_eq!(path.component(1), Some("read me.txt"));
    assert_eq!(path.component(2), None);

    assert_eq!("docs".parse::<UrlPath>(), Err(PathError::NotAbsolute));
}

#[test]
fn cursor_and_random_access() {
    let path = UrlPath::parse("/api/v1/users/42").unwrap();
    let mut cursor = path.cursor();

    assert_eq!(cursor.next_component(), Some("api"));
    assert_eq!(cursor.next_component(), Some("v1"));
    // Random access does not move the cursor.
    assert_eq!(path.component(3), Some("42"));
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.len(), 2);

    let rest: Vec<_> = cursor.by_ref().collect();
    assert_eq!(rest, ["users", "42"]);
    assert!(cursor.is_pos_past_end());
    assert_eq!(cursor.next_component(), None);

    // Cursors are independent of each other.
    assert_eq!(path.cursor().next_component(), Some("api"));
}

#[test]
fn build_path() {
    let mut path = UrlPath::new();
    assert_eq!(path.to_string(), "/");

    path.add_component("files")
        .add_component("a/b c+d~")
        .add_component("");
    assert_eq!(path.path_string(), "/files/a%2Fb%20c%2Bd~/");

    let parsed = UrlPath::parse(&path.path_string()).unwrap();
    assert_eq!(parsed, path);

    let copy = path.clone();
    path.add_component("more");
    assert_eq!(copy.num_components(), 3);
    assert_eq!(path.num_components(), 4);
}

#[test]
fn in_url() {
    let url = Url::parse("http://example.com/a/%62/").unwrap();
    assert!(url.url_path().components().eq(["a", "b", ""]));
    assert_eq!(url.normalized_path(), "/a/b/");

    let url = Url::parse("http://example.com").unwrap();
    assert_eq!(url.url_path().num_components(), 1);
    assert_eq!(url.url_path().component(0), Some(""));
}

#[cfg(feature = "serde")]
#[test]
fn serde() {
    let path = UrlPath::parse("/a%20b/c").unwrap();
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"/a%20b/c\"");
    assert_eq!(serde_json::from_str::<UrlPath>(&json).unwrap(), path);
    assert!(serde_json::from_str::<UrlPath>("\"a\"").is_err());
}
