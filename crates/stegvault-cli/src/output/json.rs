//! JSON envelopes for command results and errors.

use serde_json::{json, Value};
use stegvault_core::CapacityReport;

/// `{"status":"success","data":...}`
pub fn success_json(data: Value) -> Value {
    json!({
        "status": "success",
        "data": data,
    })
}

/// `{"status":"error","error_type":...,"message":...}`
pub fn error_json(error_type: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "error_type": error_type,
        "message": message,
    })
}

/// Capacity fields shared by `backup` and `check`.
pub fn capacity_json(report: &CapacityReport) -> Value {
    json!({
        "width": report.width,
        "height": report.height,
        "channels": report.channels,
        "total_slots": report.total_slots,
        "capacity_bytes": report.capacity_bytes,
        "max_secret_bytes": report.max_secret_bytes,
    })
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let value = success_json(json!({"payload_length": 81}));
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["payload_length"], 81);
    }

    #[test]
    fn test_error_envelope() {
        let value = error_json("decryption_failed", "Decryption failed");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error_type"], "decryption_failed");
        assert_eq!(value["message"], "Decryption failed");
    }
}
