//! CLI commands.

pub mod inspect;
pub mod keygen;
pub mod sign;
