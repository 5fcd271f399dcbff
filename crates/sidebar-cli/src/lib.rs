//! Library side of the `sidebar` command-line harness.
//!
//! Layout files describe a sidebar the way a host would feed it to the
//! redraw driver. [`render::render_layout`] runs that layout against a
//! capturing transport so the exact frames can be inspected.

pub mod layout;
pub mod logging;
pub mod render;
pub mod report;
