use std::io;

use bankdash_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let payload = json!({
        "ok": true,
        "version": success.version,
        "data": success.data,
    });
    serialize_json_pretty(&payload)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    if let Some(data) = &error.data {
        payload["error"]["data"] = data.clone();
    }
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
