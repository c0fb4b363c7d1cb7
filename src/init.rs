//! Document-ready initialization pass.

use tracing::info;

use crate::behaviors::{cards, flash, forms, hover, tabs};
use crate::config::BehaviorConfig;
use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    FlashMessages,
    CardFadeIn,
    FormGuard,
    TabSwitcher,
    HoverElevation,
}

impl Behavior {
    pub fn label(self) -> &'static str {
        match self {
            Behavior::FlashMessages => "flash_messages",
            Behavior::CardFadeIn => "card_fade_in",
            Behavior::FormGuard => "form_guard",
            Behavior::TabSwitcher => "tab_switcher",
            Behavior::HoverElevation => "hover_elevation",
        }
    }

    /// Install order.
    pub fn all() -> &'static [Behavior] {
        &[
            Behavior::FlashMessages,
            Behavior::CardFadeIn,
            Behavior::FormGuard,
            Behavior::TabSwitcher,
            Behavior::HoverElevation,
        ]
    }
}

/// What an install pass did: element counts per behavior and every timer it
/// scheduled.
#[derive(Debug)]
pub struct Installation<T> {
    pub flash_messages: usize,
    pub cards: usize,
    pub forms: usize,
    pub tab_groups: usize,
    pub hoverables: usize,
    timers: Vec<T>,
}

impl<T: Copy> Installation<T> {
    pub fn count(&self, behavior: Behavior) -> usize {
        match behavior {
            Behavior::FlashMessages => self.flash_messages,
            Behavior::CardFadeIn => self.cards,
            Behavior::FormGuard => self.forms,
            Behavior::TabSwitcher => self.tab_groups,
            Behavior::HoverElevation => self.hoverables,
        }
    }

    pub fn timers(&self) -> &[T] {
        &self.timers
    }

    /// Cancel every timer this pass scheduled. Timers that already fired are
    /// unaffected. Listeners stay attached.
    pub fn cancel_pending<P: Page<Timer = T>>(&mut self, page: &P) {
        for timer in self.timers.drain(..) {
            page.clear_timeout(timer);
        }
    }
}

pub struct PageBehaviors {
    config: BehaviorConfig,
}

impl PageBehaviors {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn is_enabled(&self, behavior: Behavior) -> bool {
        match behavior {
            Behavior::FlashMessages => self.config.flash.enabled,
            Behavior::CardFadeIn => self.config.cards.enabled,
            Behavior::FormGuard => self.config.forms.enabled,
            Behavior::TabSwitcher => self.config.tabs.enabled,
            Behavior::HoverElevation => self.config.hover.enabled,
        }
    }

    /// Wire every enabled behavior onto `page`, in [`Behavior::all`] order.
    ///
    /// Meant to run once per page load, after the document is parsed.
    pub fn install<P: Page>(&self, page: &P) -> Installation<P::Timer> {
        let mut out = Installation {
            flash_messages: 0,
            cards: 0,
            forms: 0,
            tab_groups: 0,
            hoverables: 0,
            timers: Vec::new(),
        };

        for &behavior in Behavior::all() {
            if !self.is_enabled(behavior) {
                continue;
            }
            match behavior {
                Behavior::FlashMessages => {
                    out.flash_messages =
                        flash::schedule_flash_messages(page, &self.config.flash, &mut out.timers)
                }
                Behavior::CardFadeIn => {
                    out.cards =
                        cards::schedule_card_fade_in(page, &self.config.cards, &mut out.timers)
                }
                Behavior::FormGuard => {
                    out.forms = forms::guard_form_submissions(page, &self.config.forms)
                }
                Behavior::TabSwitcher => {
                    out.tab_groups = tabs::install_tab_switchers(page, &self.config.tabs)
                }
                Behavior::HoverElevation => {
                    out.hoverables = hover::install_hover_elevation(page, &self.config.hover)
                }
            }
        }

        info!(
            flash_messages = out.flash_messages,
            cards = out.cards,
            forms = out.forms,
            tab_groups = out.tab_groups,
            hoverables = out.hoverables,
            timers = out.timers.len(),
            "page behaviors installed"
        );
        out
    }
}

impl Default for PageBehaviors {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}
