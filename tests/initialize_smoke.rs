use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use serde_json::Value;

const SERVER_TIMEOUT: Duration = Duration::from_secs(5);
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(200);
const CHANGELOG_URI: &str = "file:///tmp/project/CHANGELOG.md";

#[test]
fn initialize_smoke() {
    let mut server = spawn_server();
    let stdout = server
        .stdout
        .take()
        .expect("Child stdout should be available");
    let mut reader = BufReader::new(stdout);

    // Send initialize request
    let init_request = create_initialize_request();
    send_lsp_message(&mut server, &init_request);

    // Read and validate response
    let response = read_until(&mut reader, |msg| msg.get("id").is_some());
    validate_initialize_response(&response);

    // Open a changelog with a leftover merge marker
    send_lsp_message(
        &mut server,
        &serde_json::json!({
            "jsonrpc": "2.0",
            "method": "initialized",
            "params": {}
        }),
    );
    send_lsp_message(&mut server, &create_did_open_notification());

    let notification = read_until(&mut reader, is_publish_diagnostics);
    validate_diagnostics(&notification);

    // Resolve the conflict; the full text is revalidated
    send_lsp_message(&mut server, &create_did_change_notification());
    let notification = read_until(&mut reader, is_publish_diagnostics);
    let params = &notification["params"];
    assert_eq!(params["uri"], CHANGELOG_URI);
    assert_eq!(params["version"], 4);
    assert_eq!(params["diagnostics"], serde_json::json!([]));

    // Closing drops the document and clears its diagnostics
    send_lsp_message(&mut server, &create_did_close_notification());
    let notification = read_until(&mut reader, is_publish_diagnostics);
    let params = &notification["params"];
    assert_eq!(params["uri"], CHANGELOG_URI);
    assert!(params.get("version").is_none_or(Value::is_null), "{:?}", params);
    assert_eq!(params["diagnostics"], serde_json::json!([]));

    // Clean shutdown
    shutdown_server(server);
}

fn spawn_server() -> std::process::Child {
    Command::new(env!("CARGO_BIN_EXE_changelog-ls"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("CHANGELOG_LS_TEST_EXIT", "1")
        .spawn()
        .expect("Failed to spawn language server")
}

fn create_initialize_request() -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "processId": null,
            "rootUri": null,
            "capabilities": {
                "textDocument": {
                    "documentSymbol": { "dynamicRegistration": false },
                    "publishDiagnostics": { "versionSupport": true }
                }
            },
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }
    })
}

fn create_did_open_notification() -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didOpen",
        "params": {
            "textDocument": {
                "uri": CHANGELOG_URI,
                "languageId": "markdown",
                "version": 3,
                "text": "# Changelog\n\n## [1.0.0] - 2017-06-20\n### Added\n- a\n<<<<<<< HEAD\n- b\n"
            }
        }
    })
}

fn create_did_change_notification() -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didChange",
        "params": {
            "textDocument": { "uri": CHANGELOG_URI, "version": 4 },
            "contentChanges": [
                { "text": "# Changelog\n\n## [1.0.0] - 2017-06-20\n### Added\n- a\n- b\n" }
            ]
        }
    })
}

fn create_did_close_notification() -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didClose",
        "params": {
            "textDocument": { "uri": CHANGELOG_URI }
        }
    })
}

fn is_publish_diagnostics(message: &Value) -> bool {
    message.get("method").and_then(|m| m.as_str()) == Some("textDocument/publishDiagnostics")
}

fn send_lsp_message(child: &mut std::process::Child, message: &Value) {
    let body = message.to_string();
    let request = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

    let stdin = child
        .stdin
        .as_mut()
        .expect("Child stdin should be available");
    stdin
        .write_all(request.as_bytes())
        .expect("Failed to write request");
    stdin.flush().expect("Failed to flush stdin");
}

/// Read messages until one matches, skipping log notifications and the like
fn read_until(
    reader: &mut BufReader<std::process::ChildStdout>,
    matches: impl Fn(&Value) -> bool,
) -> Value {
    let start_time = Instant::now();

    loop {
        if start_time.elapsed() > SERVER_TIMEOUT {
            panic!("Timeout waiting for matching message");
        }

        let content_length = read_content_length_header(reader);
        let body = read_message_body(reader, content_length);
        let message: Value = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("Invalid JSON response: {}\nBody: {}", e, body));

        if matches(&message) {
            return message;
        }
    }
}

fn read_content_length_header(reader: &mut BufReader<std::process::ChildStdout>) -> usize {
    let start_time = Instant::now();
    let mut content_length = None;

    loop {
        if start_time.elapsed() > SERVER_TIMEOUT {
            panic!("Timeout waiting for response headers");
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => panic!("Unexpected EOF while reading headers"),
            Ok(_) => {
                if line.trim().is_empty() {
                    // End of headers - we've consumed the empty line
                    break;
                }

                if let Some(length_str) = line.strip_prefix("Content-Length:") {
                    content_length = Some(
                        length_str
                            .trim()
                            .parse::<usize>()
                            .expect("Invalid Content-Length header"),
                    );
                }
            }
            Err(e) => panic!("Error reading headers: {}", e),
        }
    }

    content_length.expect("Missing Content-Length header")
}

fn read_message_body(
    reader: &mut BufReader<std::process::ChildStdout>,
    content_length: usize,
) -> String {
    let mut body_bytes = vec![0u8; content_length];
    std::io::Read::read_exact(reader, &mut body_bytes).expect("Failed to read response body");

    String::from_utf8(body_bytes).expect("Response body should be valid UTF-8")
}

fn validate_initialize_response(response: &Value) {
    // Validate JSON-RPC structure
    assert_eq!(
        response.get("jsonrpc").and_then(|v| v.as_str()),
        Some("2.0"),
        "Response should have jsonrpc: '2.0'"
    );

    assert_eq!(
        response.get("id").and_then(|v| v.as_i64()),
        Some(1),
        "Response should have matching request id"
    );

    // Validate LSP initialize response structure
    let result = response
        .get("result")
        .expect("Response should contain 'result' field");

    let capabilities = result
        .get("capabilities")
        .expect("Result should contain server capabilities");

    assert!(capabilities.is_object(), "Capabilities should be an object");
    assert_eq!(
        capabilities.get("documentSymbolProvider"),
        Some(&Value::Bool(true)),
        "Should support document symbols"
    );
}

fn validate_diagnostics(notification: &Value) {
    let params = notification
        .get("params")
        .expect("Notification should carry params");

    assert_eq!(
        params.get("uri").and_then(|v| v.as_str()),
        Some(CHANGELOG_URI)
    );
    assert_eq!(params.get("version").and_then(|v| v.as_i64()), Some(3));

    let diagnostics = params
        .get("diagnostics")
        .and_then(|v| v.as_array())
        .expect("Diagnostics should be an array");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);

    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic["range"]["start"]["line"], 5);
    assert_eq!(diagnostic["severity"], 1);
    assert_eq!(diagnostic["code"], "git-conflicts");
    assert_eq!(diagnostic["source"], "changelog-lint");
    assert_eq!(
        diagnostic["message"],
        "Found git merge leftover at line 6: '<<<<<<< HEAD'"
    );
}

fn shutdown_server(mut child: std::process::Child) {
    // Close stdin to signal we're done
    drop(child.stdin.take());

    // Give the server a moment to exit gracefully
    std::thread::sleep(SHUTDOWN_GRACE_PERIOD);

    match child.try_wait() {
        Ok(Some(status)) => {
            if !status.success() {
                eprintln!("Server exited with non-zero status: {:?}", status);
            }
        }
        Ok(None) => {
            // Still running, force termination
            eprintln!("Server didn't exit gracefully, forcing termination");
            let _ = child.kill();
            let _ = child.wait();
        }
        Err(e) => panic!("Error checking server status: {}", e),
    }
}
