//! Library entry for langgate exposing locale resolution for integration tests and embedders.

pub mod config;
pub mod i18n;
pub mod paths;
pub mod util;

#[cfg(test)]
mod test_utils;
