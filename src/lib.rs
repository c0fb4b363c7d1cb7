//! Presentation behaviors for the server-rendered fleet management pages.
//!
//! The crate is host-testable: behaviors only talk to the rendering
//! environment through the [`page::Page`] and [`page::Element`] traits. The
//! browser implementation lives in the `flotte_web` crate; tests and tools use
//! the in-memory backend in [`memory`].

pub mod behaviors;
pub mod config;
pub mod error;
pub mod format;
pub mod init;
pub mod memory;
pub mod page;

pub use config::BehaviorConfig;
pub use error::{ConfigError, DateError, PageError};
pub use format::currency::format_currency;
pub use format::date::{format_date, format_date_with, DateFormat, PageDate};
pub use init::{Behavior, Installation, PageBehaviors};
pub use page::{Element, EventKind, Page, Selector, StyleProperty};
