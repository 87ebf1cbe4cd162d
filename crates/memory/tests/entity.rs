//! Entity memory and conversation chain tests.

use llm::{CompletionError, ScriptedProvider};
use memorybot_memory::{Conversation, EntityMemory, Memory, MemoryError, MemorySnapshot};

/// Backend that knows which prompt it is answering.
fn backend() -> ScriptedProvider {
    ScriptedProvider::new(|prompt| {
        let reply = if prompt.contains("Extract all of the proper nouns") {
            if prompt.ends_with("Human: Alice moved to Paris.\nOutput:") {
                "Alice, Paris"
            } else if prompt.contains("Human: Where is Alice?") {
                "Alice"
            } else {
                "NONE"
            }
        } else if prompt.contains("Entity to summarize:\nAlice") {
            "Alice moved to Paris."
        } else if prompt.contains("Entity to summarize:\nParis") {
            "Paris is where Alice lives."
        } else {
            " Noted! "
        };
        Ok(reply.to_owned())
    })
}

#[tokio::test]
async fn greeting_extracts_nothing() {
    let provider = backend();
    let mut memory = EntityMemory::default();
    let context = memory.load(&provider, "hello there").await.unwrap();
    assert!(context.entities.is_empty());
    assert_eq!(context.history, "");

    memory.save(&provider, "hello there", "hi!").await.unwrap();
    // One extraction call, no summaries.
    assert_eq!(provider.calls(), 1);
    assert!(memory.store().is_empty());
    assert_eq!(memory.buffer().turns(), 1);
}

#[tokio::test]
async fn save_summarizes_extracted_entities() {
    let provider = backend();
    let mut memory = EntityMemory::default();

    let context = memory.load(&provider, "Alice moved to Paris.").await.unwrap();
    assert_eq!(
        context.entities,
        [
            ("Alice".to_owned(), String::new()),
            ("Paris".to_owned(), String::new())
        ]
    );

    memory
        .save(&provider, "Alice moved to Paris.", "Nice!")
        .await
        .unwrap();
    assert_eq!(memory.store().get("Alice"), Some("Alice moved to Paris."));
    assert_eq!(memory.store().get("Paris"), Some("Paris is where Alice lives."));

    // The next load surfaces the stored summary.
    let context = memory.load(&provider, "Where is Alice?").await.unwrap();
    assert_eq!(
        context.entities,
        [("Alice".to_owned(), "Alice moved to Paris.".to_owned())]
    );
    assert_eq!(context.history, "Human: Alice moved to Paris.\nAI: Nice!");
}

#[tokio::test]
async fn history_is_limited_to_window() {
    let provider = backend();
    let mut memory = EntityMemory::new(3);
    for i in 0..5 {
        memory.load(&provider, &format!("q{i}")).await.unwrap();
        memory.save(&provider, &format!("q{i}"), &format!("a{i}")).await.unwrap();
    }

    let context = memory.load(&provider, "q5").await.unwrap();
    assert!(!context.history.contains("q1"));
    assert!(context.history.starts_with("Human: q2"));
    assert_eq!(context.history.lines().count(), 6);
    // The buffer itself keeps everything.
    assert_eq!(memory.snapshot().buffer.len(), 10);
}

#[test]
fn window_has_a_floor() {
    assert_eq!(EntityMemory::new(1).window(), 3);
    let mut memory = EntityMemory::new(10);
    assert_eq!(memory.window(), 10);
    memory.set_window(0);
    assert_eq!(memory.window(), 3);
}

#[tokio::test]
async fn reset_discards_everything() {
    let provider = backend();
    let mut memory = EntityMemory::new(5);
    Conversation::default()
        .run(&provider, &mut memory, "Alice moved to Paris.")
        .await
        .unwrap();
    assert!(!memory.snapshot().store.is_empty());

    memory.reset();
    assert_eq!(memory.snapshot(), MemorySnapshot::default());
    assert_eq!(memory.window(), 5);
}

#[tokio::test]
async fn conversation_runs_full_turn() {
    let provider = backend();
    let mut memory = EntityMemory::default();
    let reply = Conversation::default()
        .run(&provider, &mut memory, "Alice moved to Paris.")
        .await
        .unwrap();
    assert_eq!(reply, "Noted!");

    // extraction, reply, two summaries
    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[1].contains("Context:\nAlice: \nParis: \n"));
    assert!(prompts[1].ends_with("Human: Alice moved to Paris.\nYou:"));

    let snapshot = memory.snapshot();
    assert_eq!(
        snapshot.buffer,
        ["Human: Alice moved to Paris.", "AI: Noted!"]
    );
    assert_eq!(snapshot.store.len(), 2);
}

#[tokio::test]
async fn failed_completion_leaves_memory_untouched() {
    let provider = ScriptedProvider::new(|prompt| {
        if prompt.contains("Extract all of the proper nouns") {
            Ok("Alice".to_owned())
        } else {
            Err(CompletionError::Api {
                status: 500,
                message: "boom".into(),
            })
        }
    });
    let mut memory = EntityMemory::default();
    let err = Conversation::default()
        .run(&provider, &mut memory, "Alice?")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MemoryError::Completion(CompletionError::Api { status: 500, .. })
    ));
    assert_eq!(memory.snapshot(), MemorySnapshot::default());
}

#[tokio::test]
async fn failed_summary_commits_nothing() {
    let provider = ScriptedProvider::new(|prompt| {
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
    let mut memory = EntityMemory::default();
    let conversation = Conversation::default();

    for _ in 0..2 {
        let err = conversation
            .run(&provider, &mut memory, "Alice moved to Paris.")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MemoryError::Completion(CompletionError::Api { status: 500, .. })
        ));
        assert_eq!(memory.snapshot(), MemorySnapshot::default());
    }
}
