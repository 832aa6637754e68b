//! Configuration surface for embedding scanners.
//!
//! Hosts hand configuration down as textual key-value pairs; this module
//! pulls out the two keys the tally consumes and applies the defaults. It
//! also carries the plugin protocol version gate: an embedding that
//! receives [`TallyError::IncompatibleProtocol`] is expected to print the
//! diagnostic to stderr and exit with status 1 (the core never exits).

use crate::error::{Result, TallyError};

/// Key for the node ceiling passed to the tree constructor.
pub const MAX_HISTOGRAM_SIZE_KEY: &str = "max_histogram_size";

/// Key for the boolean-ish integer controlling histogram dumps.
pub const HISTOGRAM_DUMP_KEY: &str = "histogram_dump";

/// Default node ceiling when unset or non-positive.
pub const DEFAULT_MAX_HISTOGRAM_SIZE: usize = 1_000_000;

/// Plugin protocol version this crate speaks.
pub const PROTOCOL_VERSION: u32 = 3;

/// Parsed tally configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyConfig {
    /// Node ceiling for the tree constructor.
    pub max_nodes: usize,
    /// Whether the ingestion module dumps the histogram at shutdown.
    pub histogram_dump: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_HISTOGRAM_SIZE,
            histogram_dump: false,
        }
    }
}

impl TallyConfig {
    /// Build a configuration by looking up the known keys.
    ///
    /// Absent keys keep their defaults. A present but non-numeric value is
    /// an error; a non-positive `max_histogram_size` silently resets to
    /// [`DEFAULT_MAX_HISTOGRAM_SIZE`].
    pub fn from_lookup<'a, F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut config = Self::default();
        if let Some(raw) = get(MAX_HISTOGRAM_SIZE_KEY) {
            let value = parse_int(MAX_HISTOGRAM_SIZE_KEY, raw)?;
            if value > 0 {
                config.max_nodes = value as usize;
            }
        }
        if let Some(raw) = get(HISTOGRAM_DUMP_KEY) {
            config.histogram_dump = parse_int(HISTOGRAM_DUMP_KEY, raw)? != 0;
        }
        Ok(config)
    }

    /// Build a configuration from an iterator of `(key, value)` pairs.
    /// Unknown keys are ignored; the last occurrence of a key wins.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut max_size = None;
        let mut dump = None;
        for (key, value) in pairs {
            match key {
                MAX_HISTOGRAM_SIZE_KEY => max_size = Some(value),
                HISTOGRAM_DUMP_KEY => dump = Some(value),
                _ => {}
            }
        }
        Self::from_lookup(|key| match key {
            MAX_HISTOGRAM_SIZE_KEY => max_size,
            HISTOGRAM_DUMP_KEY => dump,
            _ => None,
        })
    }
}

/// Reject a host whose plugin protocol version this crate does not speak.
pub fn check_protocol_version(got: u32) -> Result<()> {
    if got != PROTOCOL_VERSION {
        return Err(TallyError::IncompatibleProtocol {
            expected: PROTOCOL_VERSION,
            got,
        });
    }
    Ok(())
}

fn parse_int(key: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| TallyError::InvalidConfigValue {
            key,
            value: raw.to_string(),
        })
}
