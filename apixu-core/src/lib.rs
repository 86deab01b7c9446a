//! Core library for the `apixu` weather client.
//!
//! This crate defines:
//! - The [`Apixu`] facade: input validation, request parameters, typed responses
//! - Transport ([`Api`]) and deserialization ([`Serializer`]) seams with HTTP/JSON defaults
//! - Response models for the weatherapi.com (formerly Apixu) API
//! - Configuration & credentials handling
//!
//! It is used by `apixu-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod serializer;
pub mod validate;

pub use api::{Api, ApiError, HttpApi, Params};
pub use client::Apixu;
pub use config::Config;
pub use error::{ApixuError, Result};
pub use serializer::{JsonSerializer, Serializer, SerializerError};
pub use validate::{DEFAULT_LANGUAGE, MAX_QUERY_LENGTH, SUPPORTED_LANGUAGES};
