// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;

pub mod dates;
pub mod export;
pub mod extract;
pub mod notify;
pub mod params;
pub mod record;
pub mod roles;
