pub(crate) mod clock_engine;
pub(crate) mod config;
pub(crate) mod headless;
pub(crate) mod host;
pub(crate) mod scheduler;
pub(crate) mod service;
pub(crate) mod timer;

#[cfg(test)]
#[path = "../../tests/unit/engine/fixtures.rs"]
pub(crate) mod fixtures;
