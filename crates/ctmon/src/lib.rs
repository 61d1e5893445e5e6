#![doc = include_str!("../../../README.md")]

pub use ctmon_core::*;
