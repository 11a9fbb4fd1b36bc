//! Static lookup tables for directive keywords and known interaction styles.

pub mod directives;
pub mod styles;
