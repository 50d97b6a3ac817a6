/// Application layer - Use cases, DTOs, read models and session state
///
/// This layer orchestrates the domain services and talks to infrastructure
/// only through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod session;
pub mod use_cases;
