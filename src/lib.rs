pub mod auth;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
