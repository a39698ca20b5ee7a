//! Truck trip planner server.
//!
//! A web application that answers: "Given where I am, where I pick up and
//! where I drop off, where do I refuel and rest, and what do my daily
//! duty logs look like?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod mapbox;
pub mod planner;
pub mod store;
pub mod web;
