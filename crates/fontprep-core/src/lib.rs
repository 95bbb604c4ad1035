pub mod config;
pub mod logging;

pub mod assets;
pub mod cache;
pub mod checksum;
pub mod fetch;
pub mod fsops;
pub mod naming;
pub mod pipeline;
pub mod stylesheet;
