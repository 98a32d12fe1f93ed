use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How per-cell decode failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodingMode {
    /// Swallow per-cell failures; the offending cell is left out of the row.
    #[default]
    Lenient,
    /// Report per-cell failures as errors.
    Strict,
}

/// Options for a decode pass.
///
/// Lenient by default. Scan failures and unparseable numerics are skipped rather than reported,
/// so row mappings may lack keys:
/// ```rust
/// use sql_dynamic_rows::prelude::*;
///
/// let options = DecodeOptions::default().with_strict_decoding(true);
/// assert!(options.strict_decoding);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub strict_decoding: bool,
}

impl DecodeOptions {
    #[must_use]
    pub fn with_strict_decoding(mut self, strict: bool) -> Self {
        self.strict_decoding = strict;
        self
    }

    #[must_use]
    pub fn mode(self) -> DecodingMode {
        if self.strict_decoding {
            DecodingMode::Strict
        } else {
            DecodingMode::Lenient
        }
    }
}

impl From<DecodingMode> for DecodeOptions {
    fn from(mode: DecodingMode) -> Self {
        Self {
            strict_decoding: matches!(mode, DecodingMode::Strict),
        }
    }
}
