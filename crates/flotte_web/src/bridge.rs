//! Pieces of the browser bridge that do not need a browser.
//!
//! Keeping these out of the wasm-only `web` module lets the configuration and
//! date conversion be unit-tested on the host.

use std::str::FromStr;

use flotte_ui::{format_date_with, BehaviorConfig, ConfigError, DateFormat, PageDate};
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` configuration block.
pub const CONFIG_ELEMENT_ID: &str = "flotte-ui-config";

/// What `Date.prototype.toString` prints for an invalid date.
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(flatten)]
    pub behaviors: BehaviorConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            behaviors: BehaviorConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl WebConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: WebConfig = serde_json::from_str(raw)?;
        cfg.behaviors.validate()?;
        Ok(cfg)
    }

    /// Parse the page's configuration block, if any. Blank text means defaults.
    pub fn from_page_text(text: Option<&str>) -> Result<Self, ConfigError> {
        match text.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => Self::from_json(raw),
        }
    }

    /// Unknown level names fall back to `INFO`.
    pub fn max_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.trim()).unwrap_or(tracing::Level::INFO)
    }
}

/// Build a [`PageDate`] from JavaScript `Date` getters (`month0` is 0-based).
pub fn page_date_from_parts(
    year: u32,
    month0: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<PageDate> {
    let year = i32::try_from(year).ok()?;
    let month = u8::try_from(month0.checked_add(1)?).ok()?;
    let date = PageDate::new(year, month, u8::try_from(day).ok()?).ok()?;
    date.with_time(
        u8::try_from(hour).ok()?,
        u8::try_from(minute).ok()?,
        u8::try_from(second).ok()?,
    )
    .ok()
}

/// `formatDate` for page scripts, minus the JavaScript `Date` itself.
///
/// Returns `None` for unknown format keys: the caller answers those with the
/// date's own `toString()`, which is what calling no formatter gives. For a
/// recognized key an invalid date prints as [`INVALID_DATE`].
pub fn format_date_for_script(date: Option<PageDate>, format: &str) -> Option<String> {
    let format = DateFormat::parse(format)?;
    Some(match date {
        Some(date) => format_date_with(&date, format),
        None => INVALID_DATE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_config_means_defaults() {
        assert_eq!(WebConfig::from_page_text(None).unwrap(), WebConfig::default());
        assert_eq!(
            WebConfig::from_page_text(Some("  \n ")).unwrap(),
            WebConfig::default()
        );
    }

    #[test]
    fn config_block_mixes_behaviors_and_log_level() {
        let cfg = WebConfig::from_page_text(Some(
            r#"{"log_level": "debug", "flash": {"hide_after_ms": 8000}}"#,
        ))
        .unwrap();
        assert_eq!(cfg.max_level(), tracing::Level::DEBUG);
        assert_eq!(cfg.behaviors.flash.hide_after_ms, 8000);
        assert_eq!(cfg.behaviors.flash.show_after_ms, 100);
    }

    #[test]
    fn invalid_behavior_config_is_rejected() {
        assert!(WebConfig::from_json(r#"{"cards": {"card_class": ""}}"#).is_err());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = WebConfig {
            log_level: "chatty".to_string(),
            ..WebConfig::default()
        };
        assert_eq!(cfg.max_level(), tracing::Level::INFO);
    }

    #[test]
    fn js_date_parts_convert() {
        let d = page_date_from_parts(2026, 9, 18, 9, 5, 0).unwrap();
        assert_eq!(
            format_date_for_script(Some(d), "d/m/Y").as_deref(),
            Some("18/10/2026")
        );
        assert_eq!(
            format_date_for_script(Some(d), "MMMM YYYY").as_deref(),
            Some("Octobre 2026")
        );
        assert!(page_date_from_parts(2026, 12, 1, 0, 0, 0).is_none());
        assert_eq!(
            format_date_for_script(None, "d/m/Y").as_deref(),
            Some(INVALID_DATE)
        );
    }

    #[test]
    fn unknown_format_key_is_left_to_the_native_date_string() {
        let d = page_date_from_parts(2026, 9, 18, 9, 5, 0).unwrap();
        assert_eq!(format_date_for_script(Some(d), "Y-m-d"), None);
        assert_eq!(format_date_for_script(Some(d), ""), None);
        assert_eq!(format_date_for_script(None, "?"), None);
    }
}
