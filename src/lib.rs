pub mod app_state;
pub mod config;
pub mod constants;
pub mod documents;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
