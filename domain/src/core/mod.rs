//! Core domain concepts shared by every layer

pub mod error;
pub mod participant;
