//! HTTP `Range` header resolution (RFC 7233, single `bytes` range).
//!
//! [`resolve`] turns an optional header value plus the known total length of
//! the resource into a [`ResolvedRange`], which decides the response status
//! (200, 206 or 416) and the byte interval to serve.

use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only; `\d` would also match other Unicode decimal digits.
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bytes=([0-9]+)-([0-9]*)").expect("static range pattern is valid")
});

/// A parsed `bytes=<start>-<end?>` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: u64,
    /// `None` for open-ended requests such as `bytes=500-`.
    pub end: Option<u64>,
}

impl RangeSpec {
    /// Parse a `Range` header value.
    ///
    /// Returns `None` when the value does not contain a `bytes=<digits>-`
    /// request; callers treat that the same as an absent header. Digit runs
    /// too large for `u64` saturate to `u64::MAX`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = RANGE_PATTERN.captures(value)?;

        let start = parse_saturating(caps.get(1)?.as_str());
        let end = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(parse_saturating);

        Some(Self { start, end })
    }

    /// Resolve this request against a resource of `total` bytes.
    pub fn resolve(&self, total: u64) -> ResolvedRange {
        if self.start >= total {
            return ResolvedRange::Unsatisfiable { total };
        }

        let last = total - 1;
        let end = self.end.unwrap_or(last).min(last);

        // bytes=500-100 names no bytes at all.
        if end < self.start {
            return ResolvedRange::Unsatisfiable { total };
        }

        ResolvedRange::Partial {
            start: self.start,
            end,
            total,
        }
    }
}

/// `digits` is a non-empty ASCII digit run, so overflow is the only failure.
fn parse_saturating(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Outcome of resolving a range request against a known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// Serve the whole resource (200).
    Full { total: u64 },
    /// Serve the inclusive interval `[start, end]` (206).
    Partial { start: u64, end: u64, total: u64 },
    /// The requested start lies beyond the resource (416).
    Unsatisfiable { total: u64 },
}

impl ResolvedRange {
    pub fn total(&self) -> u64 {
        match *self {
            ResolvedRange::Full { total }
            | ResolvedRange::Partial { total, .. }
            | ResolvedRange::Unsatisfiable { total } => total,
        }
    }

    /// Inclusive byte interval to serve, if any bytes are served at all.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        match *self {
            ResolvedRange::Full { total } if total > 0 => Some((0, total - 1)),
            ResolvedRange::Full { .. } => None,
            ResolvedRange::Partial { start, end, .. } => Some((start, end)),
            ResolvedRange::Unsatisfiable { .. } => None,
        }
    }

    /// Number of body bytes the response carries.
    pub fn content_length(&self) -> u64 {
        match *self {
            ResolvedRange::Full { total } => total,
            ResolvedRange::Partial { start, end, .. } => end - start + 1,
            ResolvedRange::Unsatisfiable { .. } => 0,
        }
    }

    /// Value for the `Content-Range` header; `None` for full responses.
    pub fn content_range(&self) -> Option<String> {
        match *self {
            ResolvedRange::Full { .. } => None,
            ResolvedRange::Partial { start, end, total } => {
                Some(format!("bytes {start}-{end}/{total}"))
            }
            ResolvedRange::Unsatisfiable { total } => Some(format!("bytes */{total}")),
        }
    }
}

/// Resolve an optional `Range` header against a resource of `total` bytes.
///
/// Absent or malformed headers resolve to [`ResolvedRange::Full`].
pub fn resolve(range_header: Option<&str>, total: u64) -> ResolvedRange {
    match range_header.and_then(RangeSpec::parse) {
        Some(spec) => spec.resolve(total),
        None => ResolvedRange::Full { total },
    }
}
