//! Core of the focus bar: the task model, storage capability, the list
//! controller and the pieces the command line renders with.

pub mod config;
pub mod controller;
pub mod data_storage;
pub mod formatter;
pub mod memory;
pub mod messages;
pub mod selector;
pub mod store;
pub mod task;
pub mod view;
