#![cfg(not(doctest))]

pub mod analysis;
pub mod db;
pub mod models;
pub mod request_io;
pub mod schema;
pub mod service;
pub mod validators;
