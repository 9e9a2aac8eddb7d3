//! Utility Module
//!
//! - [`FpsCounter`]: Frame rate reporting

pub mod fps_counter;

pub use fps_counter::FpsCounter;
