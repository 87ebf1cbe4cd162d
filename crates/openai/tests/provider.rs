//! Tests for the OpenAI provider setup and request bodies.

use llm::{Client, CompletionError};
use memorybot_openai::{ChatRequest, Model, OpenAI, TextRequest};
use std::time::Duration;

#[test]
fn chat_model_uses_chat_endpoint() {
    let provider = OpenAI::new(Client::new(), "sk-test", Model::Gpt35Turbo).unwrap();
    assert_eq!(
        provider.endpoint(),
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(provider.model(), Model::Gpt35Turbo);
}

#[test]
fn davinci_models_use_text_endpoint() {
    for model in [
        Model::TextDavinci003,
        Model::TextDavinci002,
        Model::CodeDavinci002,
    ] {
        let provider = OpenAI::new(Client::new(), "sk-test", model).unwrap();
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/completions");
    }
}

#[test]
fn custom_base_url_trims_trailing_slash() {
    let provider = OpenAI::custom(
        Client::new(),
        "sk-test",
        Model::Gpt35Turbo,
        "http://localhost:8080/v1/",
    )
    .unwrap()
    .with_timeout(Duration::from_secs(3));
    assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
}

#[test]
fn missing_credential_is_rejected() {
    let err = OpenAI::new(Client::new(), "", Model::Gpt35Turbo).err();
    assert!(matches!(err, Some(CompletionError::MissingCredential)));
}

#[test]
fn model_names_round_trip() {
    for model in Model::ALL {
        assert_eq!(model.as_str().parse::<Model>().unwrap(), model);
        assert_eq!(model.to_string(), model.as_str());
    }
    assert!("gpt-4".parse::<Model>().is_err());
    assert_eq!(Model::default(), Model::Gpt35Turbo);
}

#[test]
fn chat_request_body() {
    let body = ChatRequest::new(Model::Gpt35Turbo, "Hello", 0.0);
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "model": "gpt-3.5-turbo",
            "messages": [{ "role": "user", "content": "Hello" }],
            "temperature": 0.0
        })
    );
}

#[test]
fn text_request_body() {
    let body = TextRequest::new(Model::TextDavinci003, "Hello", 0.0);
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "text-davinci-003");
    assert_eq!(json["prompt"], "Hello");
    assert_eq!(json["max_tokens"], 256);
}
