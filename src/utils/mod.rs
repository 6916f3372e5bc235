//! Shared utilities behind the documentation-search commands.

pub mod docs;
pub mod fuzzy;
pub mod sphinx;
