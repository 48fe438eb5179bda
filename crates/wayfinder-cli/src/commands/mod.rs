// Handlers for the CLI subcommands. main.rs parses arguments and dispatches
// here.

pub mod find;
pub mod map;
pub mod route;
