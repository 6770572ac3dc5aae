pub mod access;
pub mod filter;
pub mod token;
