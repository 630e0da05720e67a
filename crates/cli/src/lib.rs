//! Command-line front end for the movie data-access layer.

pub mod commands;
pub mod config;
pub mod run;
