//! Common test utilities for integration tests.
//!
//! This module provides shared infrastructure for LSP integration tests,
//! including the `LspClient` for communicating with the server binary.

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, Command, Stdio};

/// A request the server sent to the client, such as `workspace/applyEdit`.
#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub method: String,
    pub params: Value,
}

/// LSP test client for communicating with the server binary.
///
/// Answers server-to-client requests on its own: `workspace/applyEdit` gets
/// `{"applied": <apply_edits>}`, anything else gets a null result.
pub(crate) struct LspClient {
    process: Child,
    /// Captured notifications in order received, as `(method, params)`.
    notifications: Vec<(String, Value)>,
    /// Captured server-to-client requests in order received.
    requests: Vec<CapturedRequest>,
    /// Answer given to `workspace/applyEdit`.
    apply_edits: bool,
    /// Buffered reader for stdout (wrapped in Option for initialization).
    reader: Option<BufReader<std::process::ChildStdout>>,
}

impl LspClient {
    /// Spawn the exdoc-lsp binary.
    pub(crate) fn spawn() -> Self {
        let mut process = Command::new(env!("CARGO_BIN_EXE_exdoc-lsp"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn exdoc-lsp binary");

        let stdout = process.stdout.take().expect("Failed to capture stdout");
        let reader = BufReader::new(stdout);

        Self {
            process,
            notifications: Vec::new(),
            requests: Vec::new(),
            apply_edits: true,
            reader: Some(reader),
        }
    }

    /// Makes the client answer `workspace/applyEdit` with `applied: false`.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn reject_edits(&mut self) {
        self.apply_edits = false;
    }

    /// Server-to-client requests received so far.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn requests(&self, method: &str) -> Vec<CapturedRequest> {
        self.requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    /// Parameters of every notification received with `method`.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn notifications(&self, method: &str) -> Vec<Value> {
        self.notifications
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Round-trips a cheap request so notifications sent before it are read.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn flush_notifications(&mut self) {
        let _ = self.code_action(998, "file:///flush.txt", 0);
    }

    /// Send a JSON-RPC message to the server.
    pub(crate) fn send(&mut self, message: &Value) {
        let body = serde_json::to_string(message).unwrap();
        let header = format!("Content-Length: {}\r\n\r\n", body.len());

        let stdin = self.process.stdin.as_mut().expect("stdin not captured");
        stdin.write_all(header.as_bytes()).unwrap();
        stdin.write_all(body.as_bytes()).unwrap();
        stdin.flush().unwrap();
    }

    fn read_message(&mut self) -> Value {
        let reader = self.reader.as_mut().expect("reader not initialized");

        loop {
            // Read headers
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                let bytes_read = reader.read_line(&mut line).expect("Failed to read header");

                // EOF - server closed connection
                assert!(bytes_read != 0, "Server closed connection unexpectedly");

                if line == "\r\n" || line == "\n" {
                    break;
                }

                if line.to_lowercase().starts_with("content-length:") {
                    content_length = line
                        .split(':')
                        .nth(1)
                        .unwrap()
                        .trim()
                        .parse()
                        .expect("Invalid content length");
                }
            }

            if content_length == 0 {
                continue;
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).expect("Failed to read body");

            return serde_json::from_slice(&body).unwrap_or_else(|e| {
                panic!("Invalid JSON: {e} in: {:?}", String::from_utf8_lossy(&body))
            });
        }
    }

    /// Read the JSON-RPC response with `expected_id`.
    ///
    /// Notifications and server requests received on the way are captured,
    /// and server requests are answered.
    pub(crate) fn read_response(&mut self, expected_id: i64) -> Value {
        loop {
            let message = self.read_message();
            let method = message
                .get("method")
                .and_then(|m| m.as_str())
                .map(str::to_string);
            let params = message.get("params").cloned().unwrap_or(Value::Null);

            match (message.get("id").cloned(), method) {
                // Server-to-client request
                (Some(id), Some(method)) => {
                    let result = if method == "workspace/applyEdit" {
                        json!({ "applied": self.apply_edits })
                    } else {
                        Value::Null
                    };
                    self.requests.push(CapturedRequest { method, params });
                    self.send(&json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "result": result
                    }));
                }
                // Notification
                (None, Some(method)) => {
                    self.notifications.push((method, params));
                }
                (Some(id), None) if id == json!(expected_id) => return message,
                // Response to some other request, keep reading
                _ => {}
            }
        }
    }

    /// Initialize the LSP session.
    pub(crate) fn initialize(&mut self) -> Value {
        self.initialize_with(Value::Null)
    }

    /// Initialize the LSP session with `initializationOptions`.
    pub(crate) fn initialize_with(&mut self, options: Value) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "processId": null,
                "capabilities": {
                    "workspace": {
                        "applyEdit": true,
                        "executeCommand": {}
                    },
                    "textDocument": {
                        "codeAction": {
                            "codeActionLiteralSupport": {
                                "codeActionKind": { "valueSet": ["quickfix"] }
                            }
                        }
                    }
                },
                "initializationOptions": options,
                "rootUri": "file:///tmp",
                "workspaceFolders": null
            }
        }));

        let response = self.read_response(1);

        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "initialized",
            "params": {}
        }));

        response
    }

    /// Open a text document.
    pub(crate) fn did_open(&mut self, uri: &str, language_id: &str, text: &str) {
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didOpen",
            "params": {
                "textDocument": {
                    "uri": uri,
                    "languageId": language_id,
                    "version": 1,
                    "text": text
                }
            }
        }));
    }

    /// Replace the full text of a document.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn did_change(&mut self, uri: &str, version: i32, text: &str) {
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didChange",
            "params": {
                "textDocument": { "uri": uri, "version": version },
                "contentChanges": [{ "text": text }]
            }
        }));
    }

    /// Request code actions for a line.
    pub(crate) fn code_action(&mut self, id: i64, uri: &str, line: u32) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "textDocument/codeAction",
            "params": {
                "textDocument": {"uri": uri},
                "range": {
                    "start": {"line": line, "character": 0},
                    "end": {"line": line, "character": 0}
                },
                "context": {"diagnostics": []}
            }
        }));
        self.read_response(id)
    }

    /// Execute a workspace command.
    pub(crate) fn execute_command(&mut self, id: i64, command: &str, arguments: Value) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "workspace/executeCommand",
            "params": {
                "command": command,
                "arguments": arguments
            }
        }));
        self.read_response(id)
    }

    /// Shutdown the server.
    pub(crate) fn shutdown(&mut self) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": 999,
            "method": "shutdown"
        }));
        self.read_response(999)
    }
}

impl Drop for LspClient {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}
