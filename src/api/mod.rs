//! HTTP API layer: handlers, DTOs, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;
