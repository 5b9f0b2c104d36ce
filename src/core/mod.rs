pub mod aggregate;
pub mod dedup;
pub mod language;
pub mod leaf;
