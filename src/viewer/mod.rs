//! egui client that fetches the catalog and animates it.
//!
//! The viewer is a native window talking to the REST API: one single-shot
//! fetch at startup pulls the full catalog and decodes every body image,
//! after which range and search interactions slice and filter the cached
//! catalog client-side with no further network traffic.
//!
//! Module split:
//! - [`fetch`]: background-thread catalog fetch and image decoding
//! - [`state`]: view state (displayed subset, angles, captions) - pure logic
//! - [`app`]: the eframe application, controls, and canvas painting

pub mod app;
pub mod fetch;
pub mod state;

pub use app::ViewerApp;
