use crate::cli::OutputFormat;
use portcall::error::get_error_info;
use portcall::PortCallError;
use serde_json::json;

pub fn emit_output(output: &OutputFormat, command: &str, payload: serde_json::Value) {
    match output {
        OutputFormat::Text => payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(
                || println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default()),
                |msg| println!("{msg}"),
            ),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "command": command,
                "status": "ok",
                "payload": payload,
            })
        ),
    }
}

pub fn emit_error(output: &OutputFormat, error: &PortCallError) {
    let code = error.code();
    match output {
        OutputFormat::Text => {
            eprintln!("error[{code}]: {error}");
            if let Some((_, fix)) = get_error_info(code) {
                eprintln!("  hint: {fix}");
            }
        }
        OutputFormat::Json => println!("{}", error_payload(error)),
    }
}

fn error_payload(error: &PortCallError) -> serde_json::Value {
    let code = error.code();
    json!({
        "status": "error",
        "error": {
            "code": code,
            "message": error.to_string(),
            "fix": get_error_info(code).map(|(_, fix)| fix),
            "exit_code": error.exit_code(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::error_payload;
    use portcall::PortCallError;

    #[test]
    fn error_payload_carries_code_and_exit_code() {
        let payload = error_payload(&PortCallError::Unauthorized("no token".to_string()));

        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error"]["code"], "UNAUTHORIZED");
        assert_eq!(payload["error"]["exit_code"], 4);
        assert!(payload["error"]["fix"].is_string());
    }
}
