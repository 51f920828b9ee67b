//! Configuration type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kinds::STANDARD_KINDS;
use crate::model::IncludeMode;

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Include mode for new selectors when none is given
    #[serde(default)]
    pub default_include_mode: IncludeMode,

    /// Known question kinds; replaces the built-in catalogue when present
    #[serde(default = "default_kinds")]
    pub kinds: BTreeMap<String, KindConfig>,
}

/// Capability flags of one question kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    /// Random selection may pick questions of this kind
    #[serde(default = "default_true")]
    pub random: bool,

    /// Answers need a human grader
    #[serde(default)]
    pub manual: bool,
}

impl Default for KindConfig {
    fn default() -> Self {
        Self {
            random: true,
            manual: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_include_mode: IncludeMode::default(),
            kinds: default_kinds(),
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_true() -> bool {
    true
}

fn default_kinds() -> BTreeMap<String, KindConfig> {
    STANDARD_KINDS
        .iter()
        .map(|&(name, random, manual)| (name.to_string(), KindConfig { random, manual }))
        .collect()
}
