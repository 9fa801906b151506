//! Store configuration and its loader.
//!
//! # File format
//!
//! Keys are the upper-case names used by the store's per-role `.config`
//! files.  Any `KEY = integer` (or `KEY=integer`) document is valid TOML, so
//! those files load unchanged:
//!
//! ```toml
//! # Store.config
//! INITIAL_ITEMS=5
//! TICK_TIME=100
//! DELIVERY_INTERVAL=100
//! ITEMS_PER_DELIVERY=10
//! ASSISTANTS=2
//! CUSTOMERS=5
//!
//! # Assistant.config
//! MAX_CARRIED_ITEMS=10
//! MAX_CARRIED_SECTIONS=3
//! BREAK_INTERVAL=100
//! BREAK_TIME=20
//!
//! # Customer.config
//! BUY_INTERVAL=10
//! ```
//!
//! `SEED` is optional (default 0).  Unknown keys are ignored.
//!
//! # Sources
//!
//! | Constructor                          | Reads                                   |
//! |--------------------------------------|-----------------------------------------|
//! | [`StoreConfig::from_toml_str`]       | one in-memory document                  |
//! | [`StoreConfig::from_path`]           | one file                                |
//! | [`StoreConfig::from_dir`]            | `Store.config`, `Assistant.config`, `Customer.config`; later files override earlier keys |

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{ConfigError, ConfigResult};

/// Per-role config file names read by [`StoreConfig::from_dir`], in merge order.
pub const CONFIG_FILES: [&str; 3] = ["Store.config", "Assistant.config", "Customer.config"];

// ── StoreConfig ───────────────────────────────────────────────────────────────

/// Resolved, validated configuration for one store run.
///
/// Every field is strictly positive except `seed`.  `*_interval` values mean
/// "1-in-N chance per decision point".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Most items an assistant can carry at once.
    pub max_carried_items:    usize,
    /// Most distinct categories an assistant picks up per trip.
    pub max_carried_sections: usize,
    /// 1-in-N chance per tick that an assistant takes a break.
    pub break_interval:       u32,
    /// Length of a break, in ticks.
    pub break_time:           u64,
    /// 1-in-N chance per tick that a customer decides to buy.
    pub buy_interval:         u32,
    /// Stock placed in every section at opening.
    pub initial_items:        usize,
    /// Wall-clock length of one tick, in milliseconds.
    pub tick_time_ms:         u64,
    /// 1-in-N chance per tick that a delivery arrives.
    pub delivery_interval:    u32,
    /// Items per delivery.
    pub items_per_delivery:   usize,
    /// Number of assistant threads.
    pub assistants:           usize,
    /// Number of customer threads.
    pub customers:            usize,
    /// Master RNG seed.  The same seed gives every actor the same stream.
    pub seed:                 u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_carried_items:    10,
            max_carried_sections: 3,
            break_interval:       100,
            break_time:           20,
            buy_interval:         10,
            initial_items:        5,
            tick_time_ms:         100,
            delivery_interval:    100,
            items_per_delivery:   10,
            assistants:           2,
            customers:            5,
            seed:                 0,
        }
    }
}

impl StoreConfig {
    /// Parse a single TOML / `.config` document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        parse_raw(text, "<inline>")?.resolve()
    }

    /// Load a single config file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        read_raw(path)?.resolve()
    }

    /// Load and merge the per-role files in `dir` (see [`CONFIG_FILES`]).
    ///
    /// Missing files are skipped; at least one must exist.
    pub fn from_dir(dir: &Path) -> ConfigResult<Self> {
        let mut merged = RawConfig::default();
        let mut found = 0usize;
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.is_file() {
                merged = merged.merge(read_raw(&path)?);
                found += 1;
            }
        }
        if found == 0 {
            return Err(ConfigError::NoConfigFiles(dir.to_path_buf()));
        }
        merged.resolve()
    }

    /// Check that every count, interval and duration is positive.
    ///
    /// Configs built by the loaders already satisfy this; call it for configs
    /// assembled in code.
    pub fn validate(&self) -> ConfigResult<()> {
        let checks: [(&'static str, u64); 11] = [
            ("MAX_CARRIED_ITEMS",    self.max_carried_items as u64),
            ("MAX_CARRIED_SECTIONS", self.max_carried_sections as u64),
            ("BREAK_INTERVAL",       self.break_interval as u64),
            ("BREAK_TIME",           self.break_time),
            ("BUY_INTERVAL",         self.buy_interval as u64),
            ("INITIAL_ITEMS",        self.initial_items as u64),
            ("TICK_TIME",            self.tick_time_ms),
            ("DELIVERY_INTERVAL",    self.delivery_interval as u64),
            ("ITEMS_PER_DELIVERY",   self.items_per_delivery as u64),
            ("ASSISTANTS",           self.assistants as u64),
            ("CUSTOMERS",            self.customers as u64),
        ];
        match checks.iter().find(|(_, v)| *v == 0) {
            Some(&(key, _)) => Err(ConfigError::NonPositive { key, value: 0 }),
            None => Ok(()),
        }
    }

    /// Wall-clock length of one tick.
    #[inline]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_time_ms)
    }
}

// ── Raw document ──────────────────────────────────────────────────────────────

/// One config document before validation.  Signed so that negative values
/// reach validation instead of failing as parse errors.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfig {
    max_carried_items:    Option<i64>,
    max_carried_sections: Option<i64>,
    break_interval:       Option<i64>,
    break_time:           Option<i64>,
    buy_interval:         Option<i64>,
    initial_items:        Option<i64>,
    tick_time:            Option<i64>,
    delivery_interval:    Option<i64>,
    items_per_delivery:   Option<i64>,
    assistants:           Option<i64>,
    customers:            Option<i64>,
    seed:                 Option<u64>,
}

impl RawConfig {
    /// Keys set in `later` win.
    fn merge(self, later: RawConfig) -> RawConfig {
        RawConfig {
            max_carried_items:    later.max_carried_items.or(self.max_carried_items),
            max_carried_sections: later.max_carried_sections.or(self.max_carried_sections),
            break_interval:       later.break_interval.or(self.break_interval),
            break_time:           later.break_time.or(self.break_time),
            buy_interval:         later.buy_interval.or(self.buy_interval),
            initial_items:        later.initial_items.or(self.initial_items),
            tick_time:            later.tick_time.or(self.tick_time),
            delivery_interval:    later.delivery_interval.or(self.delivery_interval),
            items_per_delivery:   later.items_per_delivery.or(self.items_per_delivery),
            assistants:           later.assistants.or(self.assistants),
            customers:            later.customers.or(self.customers),
            seed:                 later.seed.or(self.seed),
        }
    }

    fn resolve(self) -> ConfigResult<StoreConfig> {
        Ok(StoreConfig {
            max_carried_items:    positive("MAX_CARRIED_ITEMS", self.max_carried_items)?,
            max_carried_sections: positive("MAX_CARRIED_SECTIONS", self.max_carried_sections)?,
            break_interval:       positive("BREAK_INTERVAL", self.break_interval)?,
            break_time:           positive("BREAK_TIME", self.break_time)?,
            buy_interval:         positive("BUY_INTERVAL", self.buy_interval)?,
            initial_items:        positive("INITIAL_ITEMS", self.initial_items)?,
            tick_time_ms:         positive("TICK_TIME", self.tick_time)?,
            delivery_interval:    positive("DELIVERY_INTERVAL", self.delivery_interval)?,
            items_per_delivery:   positive("ITEMS_PER_DELIVERY", self.items_per_delivery)?,
            assistants:           positive("ASSISTANTS", self.assistants)?,
            customers:            positive("CUSTOMERS", self.customers)?,
            seed:                 self.seed.unwrap_or(0),
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn positive<T: TryFrom<i64>>(key: &'static str, value: Option<i64>) -> ConfigResult<T> {
    let value = value.ok_or(ConfigError::Missing(key))?;
    if value <= 0 {
        return Err(ConfigError::NonPositive { key, value });
    }
    T::try_from(value).map_err(|_| ConfigError::OutOfRange { key, value })
}

fn parse_raw(text: &str, origin: &str) -> ConfigResult<RawConfig> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_owned(),
        source,
    })
}

fn read_raw(path: &Path) -> ConfigResult<RawConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_raw(&text, &path.display().to_string())
}
