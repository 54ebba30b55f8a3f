//! Shared constants

pub mod limits;
