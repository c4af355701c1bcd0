//! Folio library
//!
//! A terminal portfolio whose sections reveal themselves as they scroll into
//! view. The animation core ([`reveal`]) is a headless, virtual-time engine;
//! [`page`] composes it into the six-section page, and [`tui`] draws that page
//! with ratatui.

pub mod branding;
pub mod cli;
pub mod config;
pub mod content;
pub mod export;
pub mod logging;
pub mod page;
pub mod reveal;
pub mod tui;
