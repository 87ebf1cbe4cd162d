//! Chat context tests.

mod common;

use common::{ScriptedConnector, StalledConnector, context, echo, settings};
use llm::CompletionError;
use mcore::{SessionError, SlotId};
use memory::Memory;
use memorybot_gateway::{ChatContext, ChatError, Settings};
use openai::Model;
use std::time::Duration;

#[tokio::test]
async fn submit_records_turn_and_clears_draft() {
    let connector = ScriptedConnector(echo());
    let mut chat = context();
    let id = chat.add_user();

    let reply = chat.submit(&connector, id, "hi").await.unwrap();
    assert_eq!(reply, "re: hi");

    let slot = chat.session().roster().slot(id).unwrap();
    assert_eq!(slot.past(), ["hi"]);
    assert_eq!(slot.generated(), ["re: hi"]);
    assert_eq!(slot.draft(), "");
    assert!(chat.notice().is_none());
    assert_eq!(chat.memory().snapshot().buffer, ["Human: hi", "AI: re: hi"]);
}

#[tokio::test]
async fn missing_credential_records_nothing() {
    let provider = echo();
    let connector = ScriptedConnector(provider.clone());
    let mut chat = ChatContext::new(Settings::default(), Duration::from_secs(60));
    let id = chat.add_user();

    let err = chat.submit(&connector, id, "hello?").await.unwrap_err();
    assert!(matches!(
        err,
        ChatError::Completion(CompletionError::MissingCredential)
    ));
    assert_eq!(provider.calls(), 0);

    let slot = chat.session().roster().slot(id).unwrap();
    assert!(slot.is_empty());
    assert_eq!(slot.draft(), "hello?");
    assert!(chat.notice().unwrap().contains("API key"));
    assert!(!chat.view().credential_set);
}

#[tokio::test]
async fn unknown_slot_is_an_error() {
    let connector = ScriptedConnector(echo());
    let mut chat = context();
    let err = chat
        .submit(&connector, SlotId::new(9), "hi")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ChatError::Session(SessionError::UnknownSlot(id)) if id == SlotId::new(9)
    ));
    assert!(chat.notice().is_none());
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let provider = echo();
    let connector = ScriptedConnector(provider.clone());
    let mut chat = context();
    let id = chat.add_user();

    chat.submit(&connector, id, "hi").await.unwrap();
    let failing = ScriptedConnector(llm::ScriptedProvider::new(|_| {
        Err(CompletionError::EmptyResponse)
    }));
    chat.submit(&failing, id, "kept").await.unwrap_err();
    let calls = provider.calls();

    let err = chat.submit(&connector, id, "   ").await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyInput));
    assert_eq!(provider.calls(), calls);

    let slot = chat.session().roster().slot(id).unwrap();
    assert_eq!(slot.turns(), 1);
    assert_eq!(slot.draft(), "kept");
    // The earlier failure notice is left as it was.
    assert!(chat.notice().unwrap().contains("no choices"));

    // Blank input for an unknown slot is still an unknown slot.
    assert!(matches!(
        chat.submit(&connector, SlotId::new(9), "").await,
        Err(ChatError::Session(SessionError::UnknownSlot(_)))
    ));
}

#[tokio::test]
async fn failed_completion_keeps_draft_and_sets_notice() {
    let provider = llm::ScriptedProvider::new(|_| {
        Err(CompletionError::Api {
            status: 401,
            message: "Incorrect API key provided".into(),
        })
    });
    let connector = ScriptedConnector(provider);
    let mut chat = context();
    let id = chat.add_user();

    let err = chat.submit(&connector, id, "hi").await.unwrap_err();
    assert!(matches!(
        err,
        ChatError::Completion(CompletionError::Api { status: 401, .. })
    ));
    assert!(chat.notice().unwrap().contains("Incorrect API key"));
    let slot = chat.session().roster().slot(id).unwrap();
    assert!(slot.is_empty());
    assert_eq!(slot.draft(), "hi");

    // A later success clears the notice.
    chat.submit(&ScriptedConnector(echo()), id, "hi").await.unwrap();
    assert!(chat.notice().is_none());
}

#[tokio::test]
async fn failed_summary_keeps_memory_in_step_with_session() {
    let provider = llm::ScriptedProvider::new(|prompt| {
        if prompt.contains("Extract all of the proper nouns") {
            Ok("Alice".to_owned())
        } else if prompt.contains("Entity to summarize:") {
            Err(CompletionError::Api {
                status: 500,
                message: "boom".into(),
            })
        } else {
            Ok("Nice!".to_owned())
        }
    });
    let connector = ScriptedConnector(provider);
    let mut chat = context();
    let id = chat.add_user();

    for _ in 0..2 {
        chat.submit(&connector, id, "Alice moved to Paris.")
            .await
            .unwrap_err();
        let turns = chat.session().roster().slot(id).unwrap().turns();
        assert_eq!(turns, 0);
        assert_eq!(chat.memory().buffer().turns(), turns);
        assert!(chat.memory().store().is_empty());
    }
}

#[tokio::test]
async fn slow_turn_times_out() {
    let mut chat = ChatContext::new(settings(), Duration::from_millis(50));
    let id = chat.add_user();

    let err = chat.submit(&StalledConnector, id, "hi").await.unwrap_err();
    assert!(matches!(err, ChatError::TimedOut(_)));
    assert!(chat.session().roster().slot(id).unwrap().is_empty());
    assert!(chat.notice().is_some());
}

#[tokio::test]
async fn new_chat_archives_and_resets_memory() {
    let connector = ScriptedConnector(echo());
    let mut chat = context();
    let a = chat.add_user();
    let b = chat.add_user();
    chat.submit(&connector, a, "hi").await.unwrap();
    chat.submit(&connector, b, "yo").await.unwrap();

    assert!(chat.new_chat());
    assert_eq!(
        chat.session().archives()[0].lines(),
        ["User 0: hi", "Bot 0: re: hi", "User 1: yo", "Bot 1: re: yo"]
    );
    assert_eq!(chat.session().roster().ids().collect::<Vec<_>>(), [a, b]);
    assert!(chat.session().timeline().is_empty());
    assert_eq!(chat.memory().snapshot(), Default::default());

    // Nothing to archive the second time.
    assert!(!chat.new_chat());
    assert_eq!(chat.session().archives().len(), 1);

    chat.clear_archives();
    assert!(chat.session().archives().is_empty());
}

#[test]
fn remove_user_by_id_and_last() {
    let mut chat = context();
    let a = chat.add_user();
    let b = chat.add_user();
    let c = chat.add_user();

    chat.remove_user(b).unwrap();
    assert!(matches!(
        chat.remove_user(b),
        Err(ChatError::Session(SessionError::UnknownSlot(_)))
    ));
    assert_eq!(chat.remove_last_user(), Some(c));
    assert_eq!(chat.session().roster().ids().collect::<Vec<_>>(), [a]);
}

#[test]
fn settings_update_applies_window_and_keeps_credential() {
    let mut chat = context();
    chat.update_settings(Settings {
        credential: "  ".to_owned(),
        model: Model::TextDavinci002,
        window: 8,
        preview_store: true,
        preview_buffer: false,
    });

    assert_eq!(chat.settings().credential, "sk-test-1234");
    assert_eq!(chat.settings().model, Model::TextDavinci002);
    assert_eq!(chat.memory().window(), 8);

    let view = chat.view();
    assert_eq!(view.credential_hint.as_deref(), Some("********1234"));
    assert_eq!(view.store, Some(Vec::new()));
    assert_eq!(view.buffer, None);
}
