use crate::collection::{Collection, Component};
use crate::compat::{String, ToString};
use crate::error::{Error, Result};

/// Whether any label carries the ACE prefix (`xn--`, any case).
fn has_ace_label(domain: &str) -> bool {
    domain
        .split('.')
        .any(|label| label.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("xn--")))
}

/// Process a domain using IDNA `ToASCII` algorithm
fn domain_to_ascii(domain: &str) -> Result<String> {
    // Plain ASCII hosts only need lowercasing and a character check
    if domain.is_ascii() && !has_ace_label(domain) {
        let mut result = String::with_capacity(domain.len());

        for b in domain.bytes() {
            match b {
                b'A'..=b'Z' => result.push(b.to_ascii_lowercase() as char),
                b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' => result.push(b as char),
                _ => return Err(Error::InvalidHost),
            }
        }

        return Ok(result);
    }

    idna::domain_to_ascii(domain).map_err(|_| Error::IdnaError)
}

/// Registered host name as a positional collection of labels.
///
/// Labels are stored in their ASCII (punycode) form and keyed `0..n` from
/// left to right. Every derived host is normalized again, so a value of
/// this type always holds a valid host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    labels: Collection<usize, String>,
}

impl Host {
    pub fn parse(host: &str) -> Result<Self> {
        let ascii = domain_to_ascii(host)?;
        if ascii.is_empty() {
            return Ok(Self::default());
        }

        let labels = ascii.split('.').map(ToString::to_string).enumerate().collect();
        Ok(Self {
            labels: Collection::from_unique(labels),
        })
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Component for Host {
    type Offset = usize;
    type Value = String;

    fn collection(&self) -> &Collection<usize, String> {
        &self.labels
    }

    fn new_instance(&self, data: Collection<usize, String>) -> Result<Self> {
        let mut joined = String::new();
        for (i, label) in data.values().enumerate() {
            if i > 0 {
                joined.push('.');
            }
            joined.push_str(label);
        }
        Self::parse(&joined)
    }
}

impl core::fmt::Display for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, label) in self.labels.values().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

impl core::str::FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
