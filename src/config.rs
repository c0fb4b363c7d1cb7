use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the page behaviors. Every field has a default matching the
/// stylesheet and templates the pages ship with, so an empty JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BehaviorConfig {
    pub flash: FlashConfig,
    pub cards: CardConfig,
    pub forms: FormConfig,
    pub tabs: TabConfig,
    pub hover: HoverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    pub enabled: bool,
    pub message_class: String,
    pub shown_class: String,
    pub show_after_ms: u32,
    pub hide_after_ms: u32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message_class: "flash-message".to_string(),
            shown_class: "show".to_string(),
            show_after_ms: 100,
            hide_after_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub enabled: bool,
    pub card_class: String,
    pub stagger_ms: u32,
    pub visible_opacity: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            card_class: "card".to_string(),
            stagger_ms: 100,
            visible_opacity: "1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub enabled: bool,
    pub busy_label_html: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            busy_label_html: r#"<i class="fas fa-spinner fa-spin"></i> Enregistrement..."#
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabConfig {
    pub enabled: bool,
    pub group_class: String,
    pub button_class: String,
    pub pane_class: String,
    pub active_class: String,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            group_class: "tabs".to_string(),
            button_class: "tab-button".to_string(),
            pane_class: "tab-content".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub enabled: bool,
    pub classes: Vec<String>,
    pub shadow: String,
    pub transform: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            classes: vec![
                "card".to_string(),
                "widget".to_string(),
                "trip-item".to_string(),
            ],
            shadow: "0 8px 20px rgba(0, 0, 0, 0.15)".to_string(),
            transform: "translateY(-5px)".to_string(),
        }
    }
}

impl BehaviorConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: BehaviorConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let classes = [
            ("flash.message_class", &self.flash.message_class),
            ("flash.shown_class", &self.flash.shown_class),
            ("cards.card_class", &self.cards.card_class),
            ("tabs.group_class", &self.tabs.group_class),
            ("tabs.button_class", &self.tabs.button_class),
            ("tabs.pane_class", &self.tabs.pane_class),
            ("tabs.active_class", &self.tabs.active_class),
        ];
        for (field, value) in classes {
            check_class(field, value)?;
        }
        for value in &self.hover.classes {
            check_class("hover.classes", value)?;
        }

        if self.flash.hide_after_ms < self.flash.show_after_ms {
            return Err(ConfigError::FlashWindow {
                show_ms: self.flash.show_after_ms,
                hide_ms: self.flash.hide_after_ms,
            });
        }
        if self.hover.enabled && self.hover.classes.is_empty() {
            return Err(ConfigError::NoHoverClasses);
        }
        Ok(())
    }
}

fn check_class(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidClass {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
