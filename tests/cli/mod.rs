pub mod support;

mod config;
mod logging;
mod split;
