//! runlens: run prompts against a hosted agent runtime, bind local tools, and
//! render what happens along the way.
//!
//! Configuration comes from a `.env` file merged under the process
//! environment; see [`config::EnvLoader`].

pub mod cli;
pub mod client;
pub mod config;
pub mod runner;
pub mod tools;
