//! In-memory users CRUD service
//!
//! `POST/GET /users` and `GET/PUT/DELETE /users/{id}` over a process-local
//! store. Nothing is persisted.

pub mod config;
pub mod controllers;
pub mod models;
pub mod probe;
pub mod routes;
pub mod store;
