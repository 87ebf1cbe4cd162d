//! Tests for completion response decoding.

use memorybot_llm::{
    ChatResponse, Completion, FinishReason, Role, ScriptedProvider, TextResponse,
    response::ApiErrorBody,
};

#[test]
fn chat_response_content() {
    let json = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello there." },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
    }"#;
    let response: ChatResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.content(), Some("Hello there."));
    assert_eq!(response.reason(), Some(FinishReason::Stop));
    assert_eq!(response.choices[0].message.role, Role::Assistant);
    assert_eq!(response.usage.unwrap().total_tokens, 12);
    assert_eq!(response.meta.model, "gpt-3.5-turbo");
}

#[test]
fn text_response_text() {
    let json = r#"{
        "id": "cmpl-1",
        "object": "text_completion",
        "model": "text-davinci-003",
        "choices": [{ "text": " Paris.", "index": 0, "finish_reason": "length" }]
    }"#;
    let response: TextResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.text(), Some(" Paris."));
    assert_eq!(response.choices[0].finish_reason, Some(FinishReason::Length));
    assert!(response.usage.is_none());
}

#[test]
fn unknown_finish_reason_is_other() {
    let json = r#"{ "choices": [{ "text": "x", "finish_reason": "tool_calls" }] }"#;
    let response: TextResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.choices[0].finish_reason, Some(FinishReason::Other));
}

#[test]
fn empty_choices() {
    let response: ChatResponse = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
    assert!(response.content().is_none());
}

#[test]
fn api_error_envelope() {
    let json = r#"{ "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" } }"#;
    let body: ApiErrorBody = serde_json::from_str(json).unwrap();
    assert_eq!(body.error.message, "Incorrect API key provided");
    assert_eq!(body.error.kind.as_deref(), Some("invalid_request_error"));
}

#[tokio::test]
async fn scripted_provider_records_prompts() {
    let provider = ScriptedProvider::new(|prompt| Ok(prompt.to_uppercase()));
    assert_eq!(provider.complete("abc").await.unwrap(), "ABC");
    assert_eq!(provider.complete("def").await.unwrap(), "DEF");
    assert_eq!(provider.prompts(), ["abc", "def"]);
    assert_eq!(provider.calls(), 2);
}
