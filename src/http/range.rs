//! `Range` request header parsing.
//!
//! Only a single `bytes=<start>-[<end>]` range is understood. Suffix ranges
//! (`bytes=-500`) and multi-range lists are rejected.

use crate::error::{Result, ServerError};

/// Offsets parsed from a `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Byte offset the body is served from
    pub start: u64,
    /// Last requested byte, informational only
    pub end: Option<u64>,
}

impl ByteRange {
    /// Parses a header value such as `bytes=100-` or `bytes=0-499`.
    ///
    /// ```
    /// # use hearth::http::range::ByteRange;
    /// let range = ByteRange::parse("bytes=100-").unwrap();
    /// assert_eq!(range.start, 100);
    /// assert_eq!(range.end, None);
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let ranges = value
            .trim()
            .strip_prefix("bytes=")
            .ok_or_else(|| invalid(value, "expected 'bytes=' unit"))?;

        let (start, end) = ranges
            .split_once('-')
            .ok_or_else(|| invalid(value, "missing '-' separator"))?;

        let start = start
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(value, "start offset is not a number"))?;

        let end = match end.trim() {
            "" => None,
            end => {
                let end = end
                    .parse::<u64>()
                    .map_err(|_| invalid(value, "end offset is not a number"))?;
                if end < start {
                    return Err(invalid(value, "end offset precedes start"));
                }
                Some(end)
            }
        };

        Ok(Self { start, end })
    }
}

fn invalid(value: &str, reason: &str) -> ServerError {
    ServerError::InvalidRange(format!("{:?}: {}", value, reason))
}
