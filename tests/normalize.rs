use url_canon::{component::Scheme, Normalizer, Url};

fn normalized(s: &str) -> String {
    Url::parse(s).unwrap().normalized_url().to_owned()
}

#[test]
fn normalize() {
    // Default port elision.
    assert_eq!(normalized("HTTP://Example.COM:80/"), "http://example.com/");
    assert_eq!(normalized("https://example.com:443"), "https://example.com/");
    assert_eq!(normalized("ftp://example.com:21/pub"), "ftp://example.com/pub");
    assert_eq!(normalized("https://example.com:80/"), "https://example.com:80/");
    assert_eq!(normalized("gopher://example.com:70/"), "gopher://example.com:70/");

    // Case folding leaves the path alone.
    assert_eq!(
        normalized("HTTP://WWW.EXAMPLE.COM/Path"),
        "http://www.example.com/Path"
    );

    // Percent-encoding in the path.
    assert_eq!(
        normalized("http://a/some%3dite%6D"),
        "http://a/some%3Ditem"
    );
    assert_eq!(normalized("http://a/%7Euser/a b"), "http://a/~user/a%20b");
    assert_eq!(normalized("http://a/%2f;x=%41,y"), "http://a/%2F;x=A,y");
    assert_eq!(normalized("http://a/caf%C3%A9/été"), "http://a/caf%C3%A9/%C3%A9t%C3%A9");
    assert_eq!(normalized("http://a/%zz/%"), "http://a/%25zz/%25");

    // Empty port and empty path.
    assert_eq!(normalized("http://example.com:"), "http://example.com/");

    // Fragment, by the same rule as the path.
    assert_eq!(normalized("http://a/#sec%74ion 2"), "http://a/#section%202");
    assert_eq!(normalized("http://a/#"), "http://a/");

    // Query recomposed from its fields.
    assert_eq!(normalized("http://a/?b=2&a=1&a=3"), "http://a/?b=2&a=3");
    assert_eq!(normalized("http://a/?x=%7e+%20;y"), "http://a/?x=~++&y=");
    assert_eq!(normalized("http://a/?"), "http://a/");
}

#[test]
fn idempotence() {
    let inputs = [
        "HTTP://User:Pa@ss@Example.COM:80/a/./%7e/b%2fc/?b=2&a[]=1&a[]=2&c[x][y]=%26#Frag%20",
        "example.com:8080/p?q",
        "//Host/%41%zz",
        "http://[::FFFF:1.2.3.4]/",
        "http://a/?f[0][]=1&f[0][]=2&g[1]=x&g[0]=y&h[]=1&h[k]=2",
        "http://a/#a#b?c",
        "https://a/?%5B=1&x[=2&y]=3",
        "http://a/b?c=d e+f%2B",
    ];
    for input in inputs {
        let once = normalized(input);
        let twice = normalized(&once);
        assert_eq!(once, twice, "input: {input}");
    }
}

#[test]
fn equality() {
    let a = Url::parse("http://example.com/x#one").unwrap();
    let b = Url::parse("HTTP://EXAMPLE.COM:80/x#two").unwrap();
    let c = Url::parse("example.com/x").unwrap();

    // Reflexive.
    assert!(a.equals(&a, true));
    assert!(a.equals(&a, false));

    // Symmetric.
    assert!(a.equals(&b, true) && b.equals(&a, true));
    assert!(!a.equals(&b, false) && !b.equals(&a, false));

    // Transitive.
    assert!(b.equals(&c, true));
    assert!(a.equals(&c, true));

    // Fragment-insensitive by default.
    assert_eq!(a, b);
    assert!(a.eq_ignore_fragment(&b));
    assert_ne!(a, Url::parse("http://example.com/y").unwrap());

    assert_eq!(a.normalized_url_without_fragment(), "http://example.com/x");
    assert_eq!(a.normalized_url(), "http://example.com/x#one");
}

#[test]
fn normalizer_options() {
    let normalizer = Normalizer::new()
        .default_scheme(Scheme::new_or_panic("https"))
        .sort_query(true);

    let url = normalizer.parse("example.com/?item10=a&Item2=b&a=c").unwrap();
    assert_eq!(url.normalized_url(), "https://example.com/?a=c&Item2=b&item10=a");
    assert!(url.url_query().fields().map(|(k, _)| k).eq(["a", "Item2", "item10"]));

    // A given scheme takes precedence.
    let url = normalizer.parse("http://example.com:443/").unwrap();
    assert_eq!(url.normalized_url(), "http://example.com:443/");

    let normalizer = Normalizer::new().default_port_with(|_| None);
    let url = normalizer.parse("http://example.com:80/").unwrap();
    assert_eq!(url.normalized_url(), "http://example.com:80/");
    assert_eq!(Normalizer::default().parse("a:80").unwrap().normalized_url(), "http://a/");
}

#[test]
fn validity() {
    assert!(Url::is_valid("http://example.com"));
    assert!(Url::is_valid("https://user:pw@example.com:8443/a/b?c=d&e#f"));
    assert!(Url::is_valid("example.com/path"));
    assert!(Url::is_valid("//example.com/path"));
    assert!(Url::is_valid("localhost:8080"));
    assert!(Url::is_valid("http://[::1]/"));
    assert!(Url::is_valid("http://[2001:db8::8a2e:370:7334]:443/"));
    assert!(Url::is_valid("http://127.0.0.1/"));
    assert!(Url::is_valid("custom://host/%20"));

    assert!(!Url::is_valid(""));
    assert!(!Url::is_valid("http://exa mple.com/"));
    assert!(!Url::is_valid("http://example.com/%zz"));
    assert!(!Url::is_valid("http://[::1"));
    assert!(!Url::is_valid("http://[:::1]/"));
    assert!(!Url::is_valid("http://[1.2.3.4]/"));
    assert!(!Url::is_valid("http://example.com:99999/"));
    assert!(!Url::is_valid("http:///path"));
    assert!(!Url::is_valid("mailto:someone@example.com"));
    assert!(!Url::is_valid("http://a/#b#c"));

    // Validity implies successful parsing, whatever the scheme.
    for s in ["foo:///path", "custom://:8080/x", "git://user@/repo"] {
        assert!(!Url::is_valid(s), "{s}");
        assert!(Url::parse(s).is_err(), "{s}");
    }

    let strict = Normalizer::new().allow_missing_scheme(false);
    assert!(strict.is_valid("http://example.com/"));
    assert!(!strict.is_valid("example.com/"));
    assert!(!strict.is_valid("//example.com/"));
}
