//! hackathon-hub resource server.
//!
//! Every protected route runs the access gate (credential → `Identity`) and
//! then, per route, a role gate (`RoleRule`). See `middleware::auth`.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
