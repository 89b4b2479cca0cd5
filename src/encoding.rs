use crate::compat::{Cow, String, Vec};
use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode, utf8_percent_encode};

/// Fragment percent-encode set
/// C0 control + space, ", <, >, \`
const FRAGMENT_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Path percent-encode set
/// Fragment + #, ?, ^, {, }
const PATH_SET: &AsciiSet = &FRAGMENT_SET
    .add(b'#')
    .add(b'?')
    .add(b'^')
    .add(b'{')
    .add(b'}');

/// Segment set: a decoded segment may hold `/` or `%`, both must survive a
/// round trip through the path string.
pub const SEGMENT_SET: &AsciiSet = &PATH_SET.add(b'/').add(b'%');

/// Write percent-encoded string directly to buffer
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-decode a path segment.
pub fn decode_segment(input: &str) -> Result<Cow<'_, str>> {
    percent_decode(input.as_bytes())
        .decode_utf8()
        .map_err(|_| Error::InvalidPercentEncoding)
}

/// Encode a component for use in query strings
/// (application/x-www-form-urlencoded byte serializer).
pub fn encode_form_component(buffer: &mut String, s: &str) {
    use core::fmt::Write;

    buffer.reserve(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                buffer.push(byte as char);
            }
            b' ' => buffer.push('+'),
            _ => {
                let _ = write!(buffer, "%{byte:02X}");
            }
        }
    }
}

/// Decode a query string component: `+` is a space, `%XX` a byte.
/// Malformed escapes are kept verbatim; invalid UTF-8 is an error.
pub fn decode_form_component(s: &str) -> Result<Cow<'_, str>> {
    let bytes = s.as_bytes();
    if memchr::memchr2(b'+', b'%', bytes).is_none() {
        return Ok(Cow::Borrowed(s));
    }

    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => result.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match hex_pair(bytes[i + 1], bytes[i + 2]) {
                    Some(byte) => {
                        result.push(byte);
                        i += 2;
                    }
                    None => result.push(b'%'),
                }
            }
            b => result.push(b),
        }
        i += 1;
    }

    String::from_utf8(result)
        .map(Cow::Owned)
        .map_err(|_| Error::InvalidPercentEncoding)
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}
