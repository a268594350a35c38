//! Command implementations, one module per subcommand.

pub mod decrypt;
pub mod encrypt;
