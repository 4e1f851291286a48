//! Foundation types for the Mengya page shell.
//!
//! This crate contains the host-agnostic types shared by every Mengya crate:
//! the error type, the clock abstraction, keyboard input events and the
//! TOML-backed session configuration.

pub mod clock;
pub mod config;
pub mod error;
pub mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::MengyaConfig;
pub use error::{MengyaError, Result};
pub use input::{Key, KeyEvent, Modifiers};
