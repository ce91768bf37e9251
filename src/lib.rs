// src/lib.rs

pub mod common;
pub mod config;
pub mod docs;
pub mod form;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod views;
