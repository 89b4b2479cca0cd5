/// Collection operations on URL components
use url_parts::{Component, Filter, Host, Path, Query, Selector};

fn main() -> url_parts::Result<()> {
    // Parse a query string
    let query = Query::parse("utm_source=mail&id=42&utm_medium=email&debug")?;
    println!("query: {query}"); // utm_source=mail&id=42&utm_medium=email&debug
    println!("offsets: {:?}", query.offsets());
    println!();

    // Drop tracking parameters; the original stays untouched
    let clean = query.without(Selector::predicate(|name: &String| name.starts_with("utm_")))?;
    println!("without utm_*: {}", clean.serialize()); // ?id=42&debug
    println!("original: {}", query.serialize());
    println!();

    // Keep only parameters that carry a value
    let valued = query.filter(Filter::by_value(|value: &Option<String>| value.is_some()))?;
    println!("valued: {valued}"); // utm_source=mail&id=42&utm_medium=email
    println!();

    // Path segments are re-indexed after removal
    let path = Path::parse("/api/v1/users/42")?;
    let unversioned = path.without([1])?;
    println!("path: {unversioned}"); // /api/users/42
    println!("offsets: {:?}", unversioned.offsets()); // [0, 1, 2]
    println!();

    // Host labels are normalized again on every derived host
    let host = Host::parse("WWW.Example.COM")?;
    println!("host: {host}"); // www.example.com
    println!("apex: {}", host.without([0])?); // example.com

    Ok(())
}
