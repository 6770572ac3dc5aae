// handlers/mod.rs - HTTP handlers
//
// Every /api route runs behind principal_middleware. Handlers never assume a
// caller is present: the access gates turn an absent principal into a denial.

pub mod access;
pub mod collection;
pub mod utils;

pub use access::get as access_get;
pub use access::get_all as access_get_all;

pub use collection::get as collection_get;
pub use collection::post as collection_post;
