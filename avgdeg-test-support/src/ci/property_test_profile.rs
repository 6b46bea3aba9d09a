//! Environment overrides for property-test case counts and forking.
//!
//! CI raises case counts on nightly runs through these variables; local runs
//! fall back to each suite's own defaults.

use std::env;
use std::str::FromStr;

/// Overrides the number of cases each property runs.
pub const CASES_ENV_KEY: &str = "AVGDEG_PBT_CASES";
/// Runs each property case in a forked subprocess when truthy.
pub const FORK_ENV_KEY: &str = "AVGDEG_PBT_FORK";

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, keeping `default_cases` and `default_fork` for
    /// unset or unparsable values. Unparsable values are logged at warn.
    ///
    /// # Examples
    ///
    /// ```
    /// use avgdeg_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV_KEY, default_cases),
            fork: override_or(FORK_ENV_KEY, Switch(default_fork)).0,
        }
    }

    /// Cases per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

trait Override: Sized {
    fn parse_override(raw: &str) -> Result<Self, String>;
}

impl Override for u32 {
    fn parse_override(raw: &str) -> Result<Self, String> {
        match u32::from_str(raw.trim()) {
            Ok(0) => Err("cases must be positive".to_owned()),
            Ok(cases) => Ok(cases),
            Err(error) => Err(error.to_string()),
        }
    }
}

#[derive(Clone, Copy)]
struct Switch(bool);

impl Override for Switch {
    fn parse_override(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Self(true)),
            "0" | "false" | "no" | "off" => Ok(Self(false)),
            other => Err(format!("`{other}` is not a boolean switch")),
        }
    }
}

fn override_or<T: Override>(key: &'static str, default: T) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    T::parse_override(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, reason = %reason, "ignoring property-test override");
        default
    })
}
