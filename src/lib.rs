pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod services;
pub mod state;
pub mod web;
