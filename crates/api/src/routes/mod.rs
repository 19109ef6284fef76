//! HTTP Route Handlers

pub mod importance;
pub mod predict;
