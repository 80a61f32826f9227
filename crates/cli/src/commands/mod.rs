// CLI subcommands

pub mod auth;
pub mod notes;
