#![warn(clippy::pedantic)]

pub mod client;
pub mod local_storage;
pub mod rest;

pub use client::Client;
