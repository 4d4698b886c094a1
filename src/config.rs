//! Configuration schema and loading.
//!
//! Settings come from an optional TOML file plus `TALLY__`-prefixed
//! environment variables; the schema types live in `config::schema`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
