use serde::de::DeserializeOwned;
use std::{any::type_name, fmt::Debug};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to deserialize {target}: {source}")]
pub struct SerializerError {
    pub target: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl SerializerError {
    pub fn new<T, E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self { target: short_type_name::<T>(), source: source.into() }
    }
}

/// Turns a raw response body into the requested response type.
pub trait Serializer: Send + Sync + Debug {
    fn unserialize<T: DeserializeOwned>(&self, body: &str) -> Result<T, SerializerError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn unserialize<T: DeserializeOwned>(&self, body: &str) -> Result<T, SerializerError> {
        serde_json::from_str(body).map_err(SerializerError::new::<T, _>)
    }
}

/// `apixu_core::model::CurrentWeather` -> `CurrentWeather`
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
