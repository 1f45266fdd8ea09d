use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

/// Which command produced a payload; selects the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandName {
    #[serde(rename = "account list")]
    AccountList,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "analytics")]
    Analytics,
}

impl CommandName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountList => "account list",
            Self::History => "history",
            Self::Analytics => "analytics",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: CommandName,
    pub version: String,
    pub data: Value,
}

impl SuccessEnvelope {
    pub fn new(command: CommandName, data: Value) -> Self {
        Self {
            ok: true,
            command,
            version: API_VERSION.to_string(),
            data,
        }
    }
}

pub fn success<T>(command: CommandName, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope::new(command, json_data))
}
