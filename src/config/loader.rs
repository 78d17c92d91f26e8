//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompensationScale, PayrollConfig, RatesConfig, ScaleConfig, SchemeMetadata};

const BUILTIN_SCHEME: &str = include_str!("../../config/conjuss/scheme.yaml");
const BUILTIN_SCALE: &str = include_str!("../../config/conjuss/scale.yaml");
const BUILTIN_RATES: &str = include_str!("../../config/conjuss/rates.yaml");

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and hands out the resulting [`PayrollConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/conjuss/
/// ├── scheme.yaml   # Salary structure metadata
/// ├── scale.yaml    # Basic salary per grade and step
/// └── rates.yaml    # Allowance, statutory and PAYE rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/conjuss").unwrap();
/// println!("Loaded scheme: {}", loader.scheme().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The scale or rates break a structural rule (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/conjuss")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let scale = Self::load_yaml::<ScaleConfig>(&path.join("scale.yaml"))?;
        let rates = Self::load_yaml::<RatesConfig>(&path.join("rates.yaml"))?;

        Self::assemble(metadata, scale, rates)
    }

    /// Returns the CONJUSS configuration compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin()?;
    /// assert_eq!(loader.scheme().code, "CONJUSS");
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        let metadata = Self::parse_yaml::<SchemeMetadata>(BUILTIN_SCHEME, "builtin:scheme.yaml")?;
        let scale = Self::parse_yaml::<ScaleConfig>(BUILTIN_SCALE, "builtin:scale.yaml")?;
        let rates = Self::parse_yaml::<RatesConfig>(BUILTIN_RATES, "builtin:rates.yaml")?;

        Self::assemble(metadata, scale, rates)
    }

    fn assemble(
        metadata: SchemeMetadata,
        scale: ScaleConfig,
        rates: RatesConfig,
    ) -> EngineResult<Self> {
        let scale = CompensationScale::new(scale.steps_per_grade, scale.grades)?;
        let config = PayrollConfig::new(metadata, scale, rates)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, origin: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the payroll configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }
}
