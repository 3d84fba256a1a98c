//! The query component as a structure of possibly nested fields.
//!
//! Field names may nest with bracket syntax:
//!
//! - `name=v` sets a scalar.
//! - `name[]=v` appends to a sequence.
//! - `name[key]=v` sets an entry of a mapping.
//!
//! Nesting applies recursively, up to [`MAX_DEPTH`] bracket groups.

use crate::pct_enc::{self, encoder::Form};
use core::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};
use indexmap::IndexMap;

/// The maximum number of bracket groups expanded in a field name.
///
/// Groups beyond this bound are dropped, leaving the value at the deepest
/// allowed level as a scalar. Composition does not expand containers nested
/// deeper than this either.
pub const MAX_DEPTH: usize = 64;

/// The value of a query field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A plain string.
    Scalar(String),
    /// An ordered list, from `name[]=...`.
    Sequence(Vec<QueryValue>),
    /// A mapping with unique keys, from `name[key]=...`.
    Mapping(IndexMap<String, QueryValue>),
}

impl QueryValue {
    /// Returns the string if the value is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if the value is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[QueryValue]> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Returns the entries if the value is a mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&IndexMap<String, QueryValue>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a mapping entry by key, or a sequence item by decimal index.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        match self {
            Self::Scalar(_) => None,
            Self::Sequence(seq) => key.parse::<usize>().ok().and_then(|i| seq.get(i)),
            Self::Mapping(map) => map.get(key),
        }
    }

    /// Returns the nesting depth: `0` for a scalar.
    #[must_use]
    pub fn depth(&self) -> usize {
        let max = match self {
            Self::Scalar(_) => return 0,
            Self::Sequence(seq) => seq.iter().map(Self::depth).max(),
            Self::Mapping(map) => map.values().map(Self::depth).max(),
        };
        1 + max.unwrap_or(0)
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_owned())
    }
}

impl From<bool> for QueryValue {
    fn from(x: bool) -> Self {
        Self::Scalar(if x { "1" } else { "0" }.to_owned())
    }
}

macro_rules! impl_from_num {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(x: $ty) -> Self {
                    Self::Scalar(x.to_string())
                }
            }
        )*
    };
}

impl_from_num!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, QueryValue>> for QueryValue {
    fn from(map: IndexMap<String, QueryValue>) -> Self {
        Self::Mapping(map)
    }
}

/// A query split into fields.
///
/// Field names are stored literally (decoded). Fields keep their first
/// insertion order, and a later field with the same name overwrites the
/// value of an earlier one.
///
/// # Examples
///
/// ```
/// use url_canon::{QueryValue, UrlQuery};
///
/// let query = UrlQuery::parse("b=2&a=1&a=3&f[x]=1&f[y]=2&g[]=1;g[]=2");
/// assert_eq!(query.get("a"), Some(&QueryValue::from("3")));
/// assert_eq!(query.get("f").unwrap().get("y"), Some(&QueryValue::from("2")));
/// assert_eq!(query.get("g").unwrap().as_sequence().unwrap().len(), 2);
///
/// assert_eq!(query.query_string(), "b=2&a=3&f[x]=1&f[y]=2&g[]=1&g[]=2");
/// assert_eq!(query.to_query_string(true), "a=3&b=2&f[x]=1&f[y]=2&g[]=1&g[]=2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlQuery {
    fields: IndexMap<String, QueryValue>,
}

impl UrlQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, without the leading `'?'`.
    ///
    /// Fields are separated by `'&'` or `';'`. Names and values are decoded
    /// with the form flavor of percent-encoding, so `'+'` is a space.
    /// Fields with an empty name are skipped.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut out = Self::new();
        for field in query.split(['&', ';']) {
            if field.is_empty() {
                continue;
            }
            let (name, value) = field.split_once('=').unwrap_or((field, ""));
            let name = pct_enc::decode_lossy::<Form>(name);
            let value = pct_enc::decode_lossy::<Form>(value).into_owned();

            let Some((base, keys)) = split_name(&name) else {
                continue;
            };
            out.insert_nested(base, &keys, value);
        }
        out
    }

    fn insert_nested(&mut self, base: &str, keys: &[&str], value: String) {
        if keys.is_empty() {
            self.fields.insert(base.to_owned(), QueryValue::Scalar(value));
            return;
        }
        let slot = self
            .fields
            .entry(base.to_owned())
            .or_insert_with(|| QueryValue::Scalar(String::new()));
        insert_into(slot, keys, value);
    }

    /// Sets a field, overwriting any field with the same name.
    ///
    /// The name is taken literally: brackets in it are not parsed.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.fields.get(name)
    }

    /// Checks whether a field exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Removes a field, returning its value.
    ///
    /// The order of the remaining fields is preserved.
    pub fn remove(&mut self, name: &str) -> Option<QueryValue> {
        self.fields.shift_remove(name)
    }

    /// Returns an iterator over the fields in order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &QueryValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks whether there is no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sorts the fields by name, case-insensitively in natural order.
    ///
    /// The sort is stable. See [`natural_cmp`].
    pub fn sort(&mut self) {
        self.fields.sort_by(|k1, _, k2, _| natural_cmp(k1, k2));
    }

    /// Composes the query string, keeping the field order.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.to_query_string(false)
    }

    /// Composes the query string, optionally with fields sorted by [`natural_cmp`].
    ///
    /// Every field is written as `name=value` and fields are joined by `'&'`.
    /// Names and values are encoded with the form flavor of percent-encoding,
    /// while the brackets of nested names are kept literal.
    ///
    /// Items of a sequence, or of a mapping whose keys are exactly `0`, `1`,
    /// `2`... in order, are written with `[]` when they compose to a single
    /// field, and with their index otherwise. Indices skip items composing
    /// to nothing, such as empty containers.
    #[must_use]
    pub fn to_query_string(&self, sorted: bool) -> String {
        let mut fields: Vec<_> = self.fields.iter().collect();
        if sorted {
            fields.sort_by(|(k1, _), (k2, _)| natural_cmp(k1, k2));
        }

        let mut buf = String::new();
        for (name, value) in fields {
            let prefix = pct_enc::encode_str::<Form>(name);
            compose(&mut buf, &prefix, value, 0);
        }
        buf
    }
}

/// Splits a decoded field name into its base name and bracket keys.
///
/// Returns `None` if the base name is empty.
fn split_name(name: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = name.find('[') else {
        return (!name.is_empty()).then(|| (name, Vec::new()));
    };
    if open == 0 {
        return None;
    }

    let base = &name[..open];
    let mut rest = &name[open..];
    let mut keys = Vec::new();

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            if keys.is_empty() {
                // An unmatched first bracket is part of the name.
                return Some((name, keys));
            }
            break;
        };
        if keys.len() == MAX_DEPTH {
            tracing::debug!(
                name = base,
                max_depth = MAX_DEPTH,
                "query field nested too deep, dropping excess groups"
            );
            break;
        }
        keys.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((base, keys))
}

fn insert_into(slot: &mut QueryValue, keys: &[&str], value: String) {
    let Some((&key, rest)) = keys.split_first() else {
        *slot = QueryValue::Scalar(value);
        return;
    };

    if key.is_empty() {
        match slot {
            QueryValue::Sequence(seq) => {
                seq.push(QueryValue::Scalar(String::new()));
                let last = seq.len() - 1;
                insert_into(&mut seq[last], rest, value);
            }
            QueryValue::Mapping(map) => {
                let key = next_index(map).to_string();
                let child = map
                    .entry(key)
                    .or_insert_with(|| QueryValue::Scalar(String::new()));
                insert_into(child, rest, value);
            }
            QueryValue::Scalar(_) => {
                *slot = QueryValue::Sequence(Vec::new());
                insert_into(slot, keys, value);
            }
        }
        return;
    }

    match slot {
        QueryValue::Mapping(map) => {
            let child = map
                .entry(key.to_owned())
                .or_insert_with(|| QueryValue::Scalar(String::new()));
            insert_into(child, rest, value);
        }
        QueryValue::Sequence(seq) => {
            let map = core::mem::take(seq)
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect();
            *slot = QueryValue::Mapping(map);
            insert_into(slot, keys, value);
        }
        QueryValue::Scalar(_) => {
            *slot = QueryValue::Mapping(IndexMap::new());
            insert_into(slot, keys, value);
        }
    }
}

/// Returns one more than the greatest index key of the mapping, or zero.
fn next_index(map: &IndexMap<String, QueryValue>) -> usize {
    map.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .max()
        .map_or(0, |i| i + 1)
}

/// Counts the fields a value composes to at the given depth, saturating at two.
fn field_count(value: &QueryValue, depth: usize) -> usize {
    fn sum<'a>(items: impl Iterator<Item = &'a QueryValue>, depth: usize) -> usize {
        let mut n = 0;
        for item in items {
            n += field_count(item, depth);
            if n >= 2 {
                return 2;
            }
        }
        n
    }

    match value {
        QueryValue::Scalar(_) => 1,
        _ if depth >= MAX_DEPTH => 1,
        QueryValue::Sequence(seq) => sum(seq.iter(), depth + 1),
        QueryValue::Mapping(map) => sum(map.values(), depth + 1),
    }
}

fn compose(buf: &mut String, prefix: &str, value: &QueryValue, depth: usize) {
    let push_scalar = |buf: &mut String, name: &str, s: &str| {
        if !buf.is_empty() {
            buf.push('&');
        }
        buf.push_str(name);
        buf.push('=');
        pct_enc::encode_to::<Form>(s.as_bytes(), buf);
    };

    if depth == MAX_DEPTH && !matches!(value, QueryValue::Scalar(_)) {
        tracing::debug!(
            max_depth = MAX_DEPTH,
            "query value nested too deep, writing it as empty"
        );
        push_scalar(buf, prefix, "");
        return;
    }

    let entries: Vec<(&str, &QueryValue)> = match value {
        QueryValue::Scalar(s) => {
            push_scalar(buf, prefix, s);
            return;
        }
        QueryValue::Sequence(seq) => seq.iter().map(|item| ("", item)).collect(),
        QueryValue::Mapping(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
    };

    // Items composing to nothing take no index.
    let emitted: Vec<(&str, &QueryValue, usize)> = entries
        .into_iter()
        .map(|(key, item)| (key, item, field_count(item, depth + 1)))
        .filter(|&(_, _, n)| n > 0)
        .collect();
    let list = matches!(value, QueryValue::Sequence(_))
        || emitted
            .iter()
            .enumerate()
            .all(|(i, (key, _, _))| *key == i.to_string());

    for (i, &(key, item, n)) in emitted.iter().enumerate() {
        let index = i.to_string();
        let key = match (list, n) {
            (false, _) => Some(key),
            (true, 1) => None,
            (true, _) => Some(index.as_str()),
        };
        compose_item(buf, prefix, key, item, depth);
    }
}

fn compose_item(
    buf: &mut String,
    prefix: &str,
    key: Option<&str>,
    item: &QueryValue,
    depth: usize,
) {
    let mut name = String::with_capacity(prefix.len() + key.map_or(0, str::len) + 2);
    name.push_str(prefix);
    name.push('[');
    if let Some(key) = key {
        pct_enc::encode_to::<Form>(key.as_bytes(), &mut name);
    }
    name.push(']');
    compose(buf, &name, item, depth + 1);
}

/// Compares two strings case-insensitively in natural order.
///
/// Runs of ASCII digits are compared by numeric value, so `"item2"`
/// sorts before `"item10"`. Leading zeros are ignored. Other bytes
/// are compared after ASCII lowercasing.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use url_canon::query::natural_cmp;
///
/// assert_eq!(natural_cmp("item2", "Item10"), Ordering::Less);
/// assert_eq!(natural_cmp("B", "a"), Ordering::Greater);
/// assert_eq!(natural_cmp("x01", "X1"), Ordering::Equal);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
        let end = s.iter().position(|x| !x.is_ascii_digit()).unwrap_or(s.len());
        s.split_at(end)
    }

    fn trim_zeros(s: &[u8]) -> &[u8] {
        let start = s.iter().position(|&x| x != b'0').unwrap_or(s.len());
        &s[start..]
    }

    let (mut a, mut b) = (a.as_bytes(), b.as_bytes());
    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, ra) = split_digits(a);
                let (db, rb) = split_digits(b);
                let (da, db) = (trim_zeros(da), trim_zeros(db));
                let ord = da.len().cmp(&db.len()).then_with(|| da.cmp(db));
                if ord != Ordering::Equal {
                    return ord;
                }
                (a, b) = (ra, rb);
            }
            (Some(x), Some(y)) => {
                let ord = x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                (a, b) = (&a[1..], &b[1..]);
            }
        }
    }
}

impl FromStr for UrlQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for UrlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for UrlQuery {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Self::new();
        for (name, value) in iter {
            query.add_field(name, value);
        }
        query
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{
        de::{self, MapAccess, SeqAccess, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    impl Serialize for QueryValue {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Self::Scalar(s) => serializer.serialize_str(s),
                Self::Sequence(seq) => seq.serialize(serializer),
                Self::Mapping(map) => map.serialize(serializer),
            }
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = QueryValue;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean, sequence or map")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<QueryValue, E> {
            Ok(v.into())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<QueryValue, A::Error> {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(QueryValue::Sequence(items))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<QueryValue, A::Error> {
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((k, v)) = access.next_entry()? {
                map.insert(k, v);
            }
            Ok(QueryValue::Mapping(map))
        }
    }

    impl<'de> Deserialize<'de> for QueryValue {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ValueVisitor)
        }
    }

    impl Serialize for UrlQuery {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.fields.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for UrlQuery {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let fields = IndexMap::deserialize(deserializer)?;
            Ok(Self { fields })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn scalar(s: &str) -> QueryValue {
        QueryValue::from(s)
    }

    #[test]
    fn last_wins() {
        let q = UrlQuery::parse("b=2&a=1&a=3");
        assert_eq!(q.get("a"), Some(&scalar("3")));
        assert!(q.fields().map(|(k, _)| k).eq(["b", "a"]));
        assert_eq!(q.to_query_string(true), "a=3&b=2");
    }

    #[test]
    fn nested() {
        let q = UrlQuery::parse("f[x]=1&f[y]=2");
        let f = q.get("f").unwrap().as_mapping().unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f["x"], scalar("1"));
        assert_eq!(f["y"], scalar("2"));

        let q = UrlQuery::parse("f[]=1&f[]=2");
        assert_eq!(
            q.get("f"),
            Some(&QueryValue::Sequence(vec![scalar("1"), scalar("2")]))
        );

        let q = UrlQuery::parse("a[b][c][]=1&a[b][c][]=2&a[b][d]=3");
        let c = q.get("a").unwrap().get("b").unwrap().get("c").unwrap();
        assert_eq!(c.as_sequence().unwrap(), [scalar("1"), scalar("2")]);
        assert_eq!(q.get("a").unwrap().depth(), 3);
        assert_eq!(q.query_string(), "a[b][c][]=1&a[b][c][]=2&a[b][d]=3");
    }

    #[test]
    fn separators_and_empty_fields() {
        let q = UrlQuery::parse("a=1;b=2&&c&=4;");
        assert!(q.fields().map(|(k, _)| k).eq(["a", "b", "c"]));
        assert_eq!(q.get("c"), Some(&scalar("")));
        assert_eq!(q.query_string(), "a=1&b=2&c=");

        assert!(UrlQuery::parse("").is_empty());
        assert!(UrlQuery::parse("&;&").is_empty());
        assert!(UrlQuery::parse("=1").is_empty());
        assert!(UrlQuery::parse("[x]=1").is_empty());
    }

    #[test]
    fn form_decoding() {
        let q = UrlQuery::parse("na+me=a+b%20c%7E~&%66%5Bx%5D=1");
        assert_eq!(q.get("na me"), Some(&scalar("a b c~~")));
        assert_eq!(q.get("f").unwrap().get("x"), Some(&scalar("1")));
        assert_eq!(q.query_string(), "na+me=a+b+c~~&f[x]=1");
    }

    #[test]
    fn malformed_names() {
        let q = UrlQuery::parse("a[b=1&c[d]e=2&g[h][i=3");
        assert_eq!(q.get("a[b"), Some(&scalar("1")));
        assert_eq!(q.get("c").unwrap().get("d"), Some(&scalar("2")));
        assert_eq!(q.get("g").unwrap().get("h"), Some(&scalar("3")));
        assert_eq!(q.query_string(), "a%5Bb=1&c[d]=2&g[h]=3");
    }

    #[test]
    fn mixed_containers() {
        let q = UrlQuery::parse("a[]=1&a[x]=2&a[]=3");
        let a = q.get("a").unwrap().as_mapping().unwrap();
        assert!(a.keys().eq(["0", "x", "1"]));
        assert_eq!(q.query_string(), "a[0]=1&a[x]=2&a[1]=3");

        let q = UrlQuery::parse("a=1&a[]=2");
        assert_eq!(q.get("a"), Some(&QueryValue::from(vec!["2"])));

        let q = UrlQuery::parse("a[]=1&a=2");
        assert_eq!(q.get("a"), Some(&scalar("2")));
    }

    #[test]
    fn index_collapsing() {
        let q = UrlQuery::parse("f[0]=a&f[1]=b");
        assert!(q.get("f").unwrap().as_mapping().is_some());
        assert_eq!(q.query_string(), "f[]=a&f[]=b");

        let q = UrlQuery::parse("f[1]=a&f[0]=b");
        assert_eq!(q.query_string(), "f[1]=a&f[0]=b");

        let q = UrlQuery::parse("f[][]=1&f[][]=2");
        let s = q.query_string();
        assert_eq!(s, "f[][]=1&f[][]=2");
        assert_eq!(UrlQuery::parse(&s), q);
    }

    #[test]
    fn single_field_items_collapse() {
        // Only items composing to several fields keep their index.
        let q = UrlQuery::parse("f[0][]=1&f[0][]=2&f[1][x]=3");
        let s = q.query_string();
        assert_eq!(s, "f[0][]=1&f[0][]=2&f[][x]=3");
        assert_eq!(UrlQuery::parse(&s), q);

        // Indices skip items composing to nothing.
        let mut q = UrlQuery::new();
        q.add_field(
            "f",
            QueryValue::Sequence(vec![
                QueryValue::Sequence(Vec::new()),
                scalar("x"),
                QueryValue::from(vec!["a", "b"]),
            ]),
        );
        let s = q.query_string();
        assert_eq!(s, "f[]=x&f[1][]=a&f[1][]=b");
        assert_eq!(UrlQuery::parse(&s).query_string(), s);

        let mut map = IndexMap::new();
        map.insert("0".to_owned(), QueryValue::Mapping(IndexMap::new()));
        map.insert("1".to_owned(), scalar("x"));
        let mut q = UrlQuery::new();
        q.add_field("f", map);
        let s = q.query_string();
        assert_eq!(s, "f[1]=x");
        assert_eq!(UrlQuery::parse(&s).query_string(), s);
    }

    #[test]
    fn depth_bound() {
        let deep = format!("a{}=1", "[x]".repeat(MAX_DEPTH + 10));
        let q = UrlQuery::parse(&deep);
        assert_eq!(q.get("a").unwrap().depth(), MAX_DEPTH);

        let mut value = QueryValue::from("leaf");
        for _ in 0..MAX_DEPTH + 5 {
            value = QueryValue::Sequence(vec![value]);
        }
        let mut q = UrlQuery::new();
        q.add_field("v", value);
        let s = q.query_string();
        assert_eq!(s, format!("v{}=", "[]".repeat(MAX_DEPTH)));
        assert_eq!(UrlQuery::parse(&s).query_string(), s);
    }

    #[test]
    #[traced_test]
    fn depth_bound_is_logged() {
        let q = UrlQuery::parse(&format!("a{}=1", "[x]".repeat(MAX_DEPTH + 1)));
        assert_eq!(q.len(), 1);
        assert!(logs_contain("nested too deep"));
    }

    #[test]
    fn canonical_scalars() {
        let mut q = UrlQuery::new();
        q.add_field("t", true)
            .add_field("f", false)
            .add_field("n", -42)
            .add_field("x", 1.5)
            .add_field("list", vec![1, 2])
            .add_field("a b", "c&d=e");
        assert_eq!(
            q.query_string(),
            "t=1&f=0&n=-42&x=1.5&list[]=1&list[]=2&a+b=c%26d%3De"
        );
        assert_eq!(q.remove("t"), Some(scalar("1")));
        assert!(!q.contains("t"));
        assert_eq!(q.fields().next().map(|(k, _)| k), Some("f"));
    }

    #[test]
    fn empty_containers_vanish() {
        let q: UrlQuery = [
            ("a", QueryValue::Sequence(Vec::new())),
            ("b", QueryValue::from("1")),
        ]
        .into_iter()
        .collect();
        assert_eq!(q.len(), 2);
        assert_eq!(q.query_string(), "b=1");
    }

    #[test]
    fn sort() {
        let mut q = UrlQuery::parse("item10=a&Item2=b&item1=c&B=d&a=e");
        q.sort();
        assert!(q
            .fields()
            .map(|(k, _)| k)
            .eq(["a", "B", "item1", "Item2", "item10"]));
    }

    #[test]
    fn natural_order() {
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("a10b", "a10a"), Ordering::Greater);
        assert_eq!(natural_cmp("ABC", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("x9y", "x09z"), Ordering::Less);
    }
}
