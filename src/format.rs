//! Value formatters shared by page scripts.
//!
//! Both are plain functions over explicit values; nothing here touches the page.

pub mod currency;
pub mod date;
