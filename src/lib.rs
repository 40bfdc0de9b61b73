//! Discount Editor - edit form engine for retail discounts
//!
//! This crate loads an existing discount together with its lookup lists,
//! tracks the user's selections, lets the user add new options, and submits
//! a validated update to the remote discount catalog.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
