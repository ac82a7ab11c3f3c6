use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub method: &'a str,
    pub params: Vec<Value>,
    pub id: u32,
    pub version: &'a str,
}

/// `[code, message]` pair the device uses instead of an object.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcError(pub i32, pub String);

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn into_result(self) -> Result<Value, Error> {
        if let Some(RpcError(code, message)) = self.error {
            return Err(Error::Api { code, message });
        }

        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// The device wraps every payload in a one-element `result` array.
pub(crate) fn first<T: DeserializeOwned>(result: Value) -> Result<T, Error> {
    let Value::Array(items) = result else {
        return Err(Error::Protocol("result is not an array".to_string()));
    };

    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| Error::Protocol("result array is empty".to_string()))?;

    serde_json::from_value(first).map_err(|err| Error::Protocol(err.to_string()))
}

/// List payloads arrive as `[[items]]`, or `[null]` / `null` when the device
/// has nothing to report.
pub(crate) fn list<T: DeserializeOwned>(result: Value) -> Result<Vec<T>, Error> {
    if result.is_null() {
        return Ok(vec![]);
    }

    let inner: Value = first(result)?;
    if inner.is_null() {
        return Ok(vec![]);
    }

    serde_json::from_value(inner).map_err(|err| Error::Protocol(err.to_string()))
}
