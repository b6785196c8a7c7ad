/*!
 * Tests for JSON-RPC frame types and message classification
 */

use serde_json::{json, Value};

use truelist_mcp::mcp::protocol::{
    classify_message, CallToolResult, JsonRpcResponse, MessageKind, INVALID_PARAMS,
};

#[test]
fn test_classify_message_withIdAndMethod_shouldBeRequest() {
    let json = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {}});
    assert_eq!(classify_message(&json), MessageKind::Request { id: json!(1) });
}

#[test]
fn test_classify_message_withStringId_shouldPreserveId() {
    let json = json!({"jsonrpc": "2.0", "id": "req-9", "method": "ping"});
    assert_eq!(
        classify_message(&json),
        MessageKind::Request { id: json!("req-9") }
    );
}

#[test]
fn test_classify_message_withMethodOnly_shouldBeNotification() {
    let json = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert_eq!(classify_message(&json), MessageKind::Notification);
}

#[test]
fn test_classify_message_withNullId_shouldBeNotification() {
    // A null id is treated the same as an absent one
    let json = json!({"jsonrpc": "2.0", "id": null, "method": "notifications/cancelled"});
    assert_eq!(classify_message(&json), MessageKind::Notification);
}

#[test]
fn test_classify_message_withIdOnly_shouldBeResponse() {
    let json = json!({"jsonrpc": "2.0", "id": 3, "result": {}});
    assert_eq!(classify_message(&json), MessageKind::Response);
}

#[test]
fn test_success_response_serialization_shouldOmitError() {
    let response = JsonRpcResponse::success(json!(7), json!({"ok": true}));
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value.get("jsonrpc"), Some(&json!("2.0")));
    assert_eq!(value.get("id"), Some(&json!(7)));
    assert_eq!(value.get("result"), Some(&json!({"ok": true})));
    assert!(value.get("error").is_none());
}

#[test]
fn test_error_response_serialization_shouldOmitResult() {
    let response = JsonRpcResponse::error(json!("abc"), INVALID_PARAMS, "bad arguments");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value.get("id"), Some(&json!("abc")));
    assert!(value.get("result").is_none());
    let error = value.get("error").expect("error object");
    assert_eq!(error.get("code"), Some(&json!(INVALID_PARAMS)));
    assert_eq!(error.get("message"), Some(&json!("bad arguments")));
}

#[test]
fn test_call_tool_result_serialization_shouldShapeContentBlocks() {
    let ok = serde_json::to_value(CallToolResult::text("hello")).unwrap();
    assert_eq!(
        ok.get("content"),
        Some(&json!([{"type": "text", "text": "hello"}]))
    );
    // isError is omitted on success
    assert!(ok.get("isError").is_none());

    let failed = serde_json::to_value(CallToolResult::error_text("boom")).unwrap();
    assert_eq!(failed.get("isError"), Some(&json!(true)));
    let text = failed
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| blocks[0].get("text"))
        .unwrap();
    assert_eq!(text, &json!("boom"));
}
