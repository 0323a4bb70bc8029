mod args;
mod ask;
mod commands;
mod env_cmd;
mod logging;
mod tools_cmd;
mod util;

pub use args::Cli;
pub use logging::init_logging;

#[cfg(test)]
mod tests;
