#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Data-driven collection tests over the bundled URL components
///
/// Cases live in `cases/collection_cases.json`; string entries are comments.
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;
use url_parts::{Component, Filter, Host, Path, Query};

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
enum TestCase {
    Case {
        component: String,
        input: String,
        #[serde(default)]
        without: Option<Vec<Value>>,
        #[serde(default)]
        keep_value: Option<String>,
        #[serde(default)]
        expected: Option<String>,
        #[serde(default)]
        offsets: Option<Vec<Value>>,
        #[serde(default)]
        failure: Option<bool>,
    },
    #[allow(dead_code)]
    Comment(String),
}

trait FromJson: Sized {
    fn from_json(value: &Value) -> Option<Self>;
}

impl FromJson for usize {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64().map(|n| n as usize)
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromJson for Option<String> {
    fn from_json(value: &Value) -> Option<Self> {
        Some(value.as_str().map(String::from))
    }
}

trait ToJson {
    fn to_json(&self) -> Value;
}

impl ToJson for usize {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

/// Apply the case's operation and return the serialized result with its offsets.
fn apply<C>(
    parsed: url_parts::Result<C>,
    without: Option<&[Value]>,
    keep_value: Option<&str>,
) -> url_parts::Result<(String, Vec<Value>)>
where
    C: Component + Display,
    C::Offset: FromJson + ToJson,
    C::Value: FromJson + PartialEq,
{
    let component = parsed?;

    let derived = if let Some(offsets) = without {
        let offsets: Vec<C::Offset> = offsets
            .iter()
            .map(|v| {
                <C::Offset as FromJson>::from_json(v).expect("offset of the component's type")
            })
            .collect();
        component.without(offsets)?
    } else if let Some(value) = keep_value {
        let wanted = <C::Value as FromJson>::from_json(&Value::from(value))
            .expect("value of the component's type");
        component.filter(Filter::by_value(move |v: &C::Value| *v == wanted))?
    } else {
        component
    };

    let offsets = derived.offsets().iter().map(ToJson::to_json).collect();
    Ok((derived.to_string(), offsets))
}

#[test]
fn test_collection_cases() {
    let test_data = include_str!("./cases/collection_cases.json");
    let tests: Vec<TestCase> =
        serde_json::from_str(test_data).expect("Failed to parse collection cases");

    let mut ran = 0;
    let mut failures = Vec::new();

    for test in tests {
        let TestCase::Case {
            component,
            input,
            without,
            keep_value,
            expected,
            offsets,
            failure,
        } = test
        else {
            continue;
        };
        ran += 1;

        let without = without.as_deref();
        let keep_value = keep_value.as_deref();
        let outcome = match component.as_str() {
            "query" => apply(Query::parse(&input), without, keep_value),
            "path" => apply(Path::parse(&input), without, keep_value),
            "host" => apply(Host::parse(&input), without, keep_value),
            other => panic!("unknown component kind: {other}"),
        };

        match (outcome, failure == Some(true)) {
            (Err(_), true) => {}
            (Ok(result), true) => {
                failures.push(format!(
                    "{component} {input:?}: expected failure, got {result:?}"
                ));
            }
            (Err(err), false) => {
                failures.push(format!("{component} {input:?}: unexpected error: {err}"));
            }
            (Ok((serialized, found)), false) => {
                if let Some(expected) = expected.filter(|e| *e != serialized) {
                    failures.push(format!(
                        "{component} {input:?}: expected {expected:?}, got {serialized:?}"
                    ));
                }
                if let Some(expected) = offsets.filter(|e| *e != found) {
                    failures.push(format!(
                        "{component} {input:?}: expected offsets {expected:?}, got {found:?}"
                    ));
                }
            }
        }
    }

    assert!(ran > 0, "no collection cases loaded");
    assert!(
        failures.is_empty(),
        "{} failing cases:\n{}",
        failures.len(),
        failures.join("\n")
    );
}
