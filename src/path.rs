use crate::collection::{Collection, Component};
use crate::compat::{Cow, String, Vec};
use crate::encoding::{SEGMENT_SET, decode_segment, percent_encode_into};
use crate::error::{Error, Result};

/// URL path as a positional collection of decoded segments.
///
/// Segments are always keyed `0..n`: a derived path is re-indexed, so
/// removing segment 1 of `/a/b/c` yields `/a/c` with offsets `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    absolute: bool,
    segments: Collection<usize, String>,
}

impl Path {
    /// Parse a path string. A leading `/` makes the path absolute; a
    /// trailing `/` leaves an empty last segment.
    pub fn parse(path: &str) -> Result<Self> {
        let (absolute, rest) = match path.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, path),
        };

        let segments = rest
            .split('/')
            .map(|segment| decode_segment(segment).map(Cow::into_owned))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_segments(absolute, segments))
    }

    /// Build from decoded segments. A lone empty segment prints the same
    /// as no segment at all, so it is dropped.
    pub fn from_segments<I, S>(absolute: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<(usize, String)> =
            segments.into_iter().map(Into::into).enumerate().collect();
        if segments.len() == 1 && segments[0].1.is_empty() {
            segments.clear();
        }
        Self {
            absolute,
            segments: Collection::from_unique(segments),
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(&index).map(String::as_str)
    }
}

impl Component for Path {
    type Offset = usize;
    type Value = String;

    fn collection(&self) -> &Collection<usize, String> {
        &self.segments
    }

    fn new_instance(&self, data: Collection<usize, String>) -> Result<Self> {
        Ok(Self::from_segments(
            self.absolute,
            data.into_iter().map(|(_, segment)| segment),
        ))
    }
}

impl core::fmt::Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut out = String::new();
        if self.absolute {
            out.push('/');
        }
        for (i, segment) in self.segments.values().enumerate() {
            if i > 0 {
                out.push('/');
            }
            percent_encode_into(&mut out, segment, SEGMENT_SET);
        }
        f.write_str(&out)
    }
}

impl core::str::FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
