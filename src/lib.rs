pub mod access;
pub mod auth;
pub mod cli;
pub mod cms;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod types;
