//! CLI command implementations

pub mod click;
pub mod inspect;
pub mod json_output;
pub mod noise;
pub mod render;
