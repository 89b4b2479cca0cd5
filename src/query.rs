use crate::collection::{Collection, Component};
use crate::compat::{Cow, String, Vec};
use crate::encoding::{decode_form_component, encode_form_component};
use crate::error::{Error, Result};

/// Represents a URL query string as an ordered collection of parameters.
///
/// Offsets are decoded parameter names. A parameter written without `=`
/// (as in `?flag`) has no value, which is kept apart from an empty one
/// (`?flag=`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Collection<String, Option<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self {
            params: Collection::new(),
        }
    }

    /// Parse from a query string (with or without leading `?`).
    ///
    /// When a name repeats, the last value wins and the parameter stays at
    /// the position of its first occurrence.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut pairs = Vec::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match memchr::memchr(b'=', pair.as_bytes()) {
                Some(pos) => (&pair[..pos], Some(&pair[pos + 1..])),
                None => (pair, None),
            };
            let key = decode_form_component(key)?.into_owned();
            let value = value
                .map(decode_form_component)
                .transpose()?
                .map(Cow::into_owned);
            pairs.push((key, value));
        }

        Ok(Self {
            params: Collection::validate_source(pairs),
        })
    }

    /// Build from already-decoded name/value pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let params = pairs
            .into_iter()
            .map(|(key, value)| (String::from(key), value.map(String::from)))
            .collect();
        Self { params }
    }

    /// Value of a parameter: `None` if absent, `Some(None)` if the
    /// parameter carries no value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.params.get(key).map(Option::as_deref)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Convert to query string with leading `?`, or empty string if no parameters.
    pub fn serialize(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        let mut result = String::from("?");
        self.write_pairs(&mut result);
        result
    }

    fn write_pairs(&self, out: &mut String) {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            encode_form_component(out, key);
            if let Some(value) = value {
                out.push('=');
                encode_form_component(out, value);
            }
        }
    }
}

impl Component for Query {
    type Offset = String;
    type Value = Option<String>;

    fn collection(&self) -> &Collection<String, Option<String>> {
        &self.params
    }

    fn new_instance(&self, data: Collection<String, Option<String>>) -> Result<Self> {
        Ok(Self { params: data })
    }

    /// Names may be given encoded or decoded: `a%5B%5D` and `a[]` address
    /// the same parameter. A name already stored is taken as is, so every
    /// offset returned by `offsets()` addresses its own parameter.
    fn validate_offset(&self, offset: &String) -> Result<String> {
        if self.params.contains_key(offset.as_str()) {
            return Ok(offset.clone());
        }
        decode_form_component(offset)
            .map(Cow::into_owned)
            .map_err(|_| Error::InvalidOffset)
    }
}

/// Query string without leading `?`.
impl core::fmt::Display for Query {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut out = String::new();
        self.write_pairs(&mut out);
        f.write_str(&out)
    }
}

impl core::str::FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collection::{Filter, Selector};
    use crate::compat::ToString;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn test_parse_empty() {
        let query = Query::parse("").unwrap();
        assert_eq!(query.count(), 0);
        assert_eq!(Query::parse("?").unwrap().count(), 0);
    }

    #[test]
    fn test_parse_multiple() {
        let query = Query::parse("key1=value1&key2=value2&key3=value3").unwrap();
        assert_eq!(query.count(), 3);
        assert_eq!(query.get("key1"), Some(Some("value1")));
        assert_eq!(query.get("key3"), Some(Some("value3")));
        assert_eq!(query.get("key4"), None);
    }

    #[test]
    fn test_parse_with_question_mark() {
        let query = Query::parse("?key=value").unwrap();
        assert_eq!(query.get("key"), Some(Some("value")));
    }

    #[test]
    fn test_parse_no_value() {
        let query = Query::parse("key1&key2=").unwrap();
        assert_eq!(query.get("key1"), Some(None));
        assert_eq!(query.get("key2"), Some(Some("")));
        assert_eq!(query.to_string(), "key1&key2=");
    }

    #[test]
    fn test_parse_duplicate_keys() {
        let query = Query::parse("a=1&b=2&a=3").unwrap();
        assert_eq!(query.offsets(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(query.get("a"), Some(Some("3")));
    }

    #[test]
    fn test_parse_edge_cases() {
        let query = Query::parse("&&&key=value&&&").unwrap();
        assert_eq!(query.count(), 1);

        let query = Query::parse("key=value=with=equals").unwrap();
        assert_eq!(query.get("key"), Some(Some("value=with=equals")));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        assert_eq!(Query::parse("a=%FF"), Err(Error::InvalidPercentEncoding));
    }

    #[test]
    fn test_decoding() {
        let query = Query::parse("key=value+with+spaces&k%26=a%3Db").unwrap();
        assert_eq!(query.get("key"), Some(Some("value with spaces")));
        assert_eq!(query.get("k&"), Some(Some("a=b")));
    }

    #[test]
    fn test_serialize() {
        let query = Query::from_pairs([("key", Some("value with spaces")), ("a&b", None)]);
        assert_eq!(query.serialize(), "?key=value+with+spaces&a%26b");
        assert_eq!(Query::new().serialize(), "");
    }

    #[test]
    fn test_has_offset_encoded_name() {
        let query = Query::parse("a%5B%5D=1").unwrap();
        assert!(query.has_offset(&"a[]".to_string()).unwrap());
        assert!(query.has_offset(&"a%5B%5D".to_string()).unwrap());
        assert!(!query.has_offset(&"a".to_string()).unwrap());
    }

    #[test]
    fn test_invalid_offset() {
        let query = Query::parse("a=1").unwrap();
        assert_eq!(
            query.has_offset(&"%C3".to_string()),
            Err(Error::InvalidOffset)
        );
        assert_eq!(
            query.without(vec!["%C3".to_string()]),
            Err(Error::InvalidOffset)
        );
    }

    #[test]
    fn test_without() {
        let query = Query::parse("a=1&b=2&c=3").unwrap();
        let reduced = query.without(vec!["b".to_string()]).unwrap();
        assert_eq!(reduced.to_string(), "a=1&c=3");
        assert_eq!(query.to_string(), "a=1&b=2&c=3");

        let reduced = query
            .without(Selector::predicate(|name: &String| name != "a"))
            .unwrap();
        assert_eq!(reduced.to_string(), "a=1");
    }

    #[test]
    fn test_filter() {
        let query = Query::parse("a=1&flag&b=1&c=2").unwrap();

        let ones = query
            .filter(Filter::by_value(|v: &Option<String>| v.as_deref() == Some("1")))
            .unwrap();
        assert_eq!(ones.to_string(), "a=1&b=1");

        let short = query
            .filter(Filter::by_offset(|name: &String| name.len() == 1))
            .unwrap();
        assert_eq!(short.to_string(), "a=1&b=1&c=2");
    }

    #[test]
    fn test_offsets_of() {
        let query = Query::parse("a=1&flag&b=1").unwrap();
        assert_eq!(
            query.offsets_of(&Some("1".to_string())),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(query.offsets_of(&None), vec!["flag".to_string()]);
    }

    #[test]
    fn test_stored_names_with_escape_characters() {
        let query = Query::parse("a%2Bb=1&%25C3=2&x+y=3").unwrap();
        let names = query.offsets();
        assert_eq!(
            names,
            vec!["a+b".to_string(), "%C3".to_string(), "x y".to_string()]
        );

        for name in &names {
            assert!(query.has_offset(name).unwrap());
        }
        assert!(query.has_offset(&"a%2Bb".to_string()).unwrap());
        assert!(query.has_offset(&"x+y".to_string()).unwrap());

        assert_eq!(query.without(names.clone()).unwrap().count(), 0);
        assert_eq!(
            query
                .without(Selector::predicate(|_: &String| true))
                .unwrap()
                .count(),
            0
        );

        let reduced = query.without(vec!["a+b".to_string()]).unwrap();
        assert_eq!(reduced.to_string(), "%25C3=2&x+y=3");
    }
}
