/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Settings file for the lazymat binaries.
//!
//! Every field has a default, so an empty document (or no file at all) is valid.

use crate::errors::{Error, Result};

use lazymat_data::OptimizePolicy;
use log::warn;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// See the type for documentation.
    #[serde(default)]
    pub optimize: Optimize,

    /// See the type for documentation.
    #[serde(default)]
    pub demo: Demo,
}

/// When products get materialized in the background.
///
/// # Example:
///
/// ```yaml
/// optimize:
///   enabled: true
///   # products of 4 or more matrices
///   chain-threshold: 3
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Optimize {
    #[serde(default = "optimize__enabled")]
    pub enabled: bool,

    /// A product of strictly more than this many matrices is optimized.
    #[serde(default = "optimize__chain_threshold")]
    pub chain_threshold: usize,
}
fn optimize__enabled() -> bool { OptimizePolicy::default().enabled }
fn optimize__chain_threshold() -> usize { OptimizePolicy::default().chain_threshold }

impl Default for Optimize {
    fn default() -> Self {
        Optimize { enabled: optimize__enabled(), chain_threshold: optimize__chain_threshold() }
    }
}

impl Optimize {
    pub fn policy(&self) -> OptimizePolicy {
        OptimizePolicy { enabled: self.enabled, chain_threshold: self.chain_threshold }
    }
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Demo {
    /// Print every matrix the demo computes, not just the summary.
    #[serde(default)]
    pub print: bool,
}

impl Settings {
    pub fn from_reader(mut r: impl Read) -> Result<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text).map_err(Error::io("<config>"))?;
        Self::from_str(&text)
    }

    pub fn from_str(text: &str) -> Result<Self> {
        // an empty document is null (or nothing at all), not an empty mapping
        let value = match text.trim().is_empty() {
            true => serde_yaml::Value::Null,
            false => serde_yaml::from_str(text)?,
        };
        let value = match value {
            serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
            value => value,
        };
        Ok(serde_ignored::deserialize(
            value,
            |path| warn!("Unused config item (possible typo?): {}", path),
        )?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::io(path))?;
        Self::from_reader(file)
    }
}
