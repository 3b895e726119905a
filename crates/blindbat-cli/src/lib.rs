//! BlindBat CLI library.
//!
//! Command implementations behind the `blindbat` binary: rendering clicks
//! from settings, rendering raw band-limited noise, and inspecting the
//! resulting WAV files.

pub mod commands;
