//! Browser bindings for the page behaviors.
//!
//! Only the configuration and date bridge in [`bridge`] is compiled on the
//! host; the `web-sys` backend and the JavaScript exports need `--features web`
//! on a wasm32 target.

pub mod bridge;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{start, WebElement, WebPage};
