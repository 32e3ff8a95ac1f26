// Library root for the `ugf` binary, exposed so the command surface and
// config loading can be tested without spawning a process.

pub mod commands;
pub mod config;
