//! Object-to-object mapping between entities and transfer objects.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Converts between typed records.
///
/// Implementations decide how fields correspond; the service only relies on
/// the two operations below.
pub trait Mapper: Send + Sync {
    /// Creates a new `D` from `source`.
    fn map<S, D>(&self, source: &S) -> Result<D, AppError>
    where
        S: Serialize + ?Sized,
        D: DeserializeOwned;

    /// Merges `source` into an existing `destination`, returning that same
    /// instance.
    fn map_into<'d, S, D>(&self, source: &S, destination: &'d mut D) -> Result<&'d mut D, AppError>
    where
        S: Serialize + ?Sized,
        D: Serialize + DeserializeOwned;
}

/// Field-by-name mapper built on serde's data model.
///
/// Both sides are viewed as JSON objects. [`map`](Mapper::map) builds the
/// destination from whatever source fields it recognises (unknown fields are
/// ignored, missing ones need `#[serde(default)]`). [`map_into`](Mapper::map_into)
/// only overwrites fields the destination already has.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapper;

impl JsonMapper {
    /// Same as [`JsonMapper::default`].
    pub fn new() -> Self {
        Self
    }
}

impl Mapper for JsonMapper {
    fn map<S, D>(&self, source: &S) -> Result<D, AppError>
    where
        S: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let value = serde_json::to_value(source).map_err(AppError::Mapping)?;
        serde_json::from_value(value).map_err(AppError::Mapping)
    }

    fn map_into<'d, S, D>(&self, source: &S, destination: &'d mut D) -> Result<&'d mut D, AppError>
    where
        S: Serialize + ?Sized,
        D: Serialize + DeserializeOwned,
    {
        let source = serde_json::to_value(source).map_err(AppError::Mapping)?;
        let mut merged = serde_json::to_value(&*destination).map_err(AppError::Mapping)?;

        match (source, &mut merged) {
            (JsonValue::Object(fields), JsonValue::Object(target)) => {
                for (name, value) in fields {
                    if let Some(slot) = target.get_mut(&name) {
                        *slot = value;
                    }
                }
            }
            // Scalars and sequences replace the destination wholesale.
            (value, target) => *target = value,
        }

        *destination = serde_json::from_value(merged).map_err(AppError::Mapping)?;
        Ok(destination)
    }
}
