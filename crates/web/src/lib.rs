//! CarValue browser frontend.
//!
//! On load the module builds a [`carvalue_core::PageController`] over the
//! live DOM, `localStorage` and the prediction endpoint of the serving
//! origin, then forwards form, field and visibility events to it. The
//! markup's inline handlers reach it through `window.toggleTheme`,
//! `window.scrollToPredict` and `window.downloadReport`.
//!
//! Only [`config`] and [`logging`] build outside the browser.

pub mod config;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use app::start;
