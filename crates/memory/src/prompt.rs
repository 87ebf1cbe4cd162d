//! Prompt templates.
//!
//! Templates use minijinja syntax (`{{ name }}`) and are rendered without
//! autoescaping; the output goes to the model, not a browser.

use minijinja::Environment;
use serde::Serialize;
use std::borrow::Cow;

/// The conversation prompt: entity context, recent history, new input.
pub const CONVERSATION: &str = "\
You are an assistant to a human, powered by a large language model.

You can help with a wide range of tasks, from answering simple questions \
to in-depth explanations and discussions on many topics. You write \
natural, coherent replies that stay relevant to the conversation.

You have access to personal information the human has shared, listed in \
the Context section below. Use it when it helps, and do not invent facts \
that are not there.

Context:
{{ entities }}

Current conversation:
{{ history }}
Last line:
Human: {{ input }}
You:";

/// Extract the entities named in the last line.
pub const ENTITY_EXTRACTION: &str = "\
You are an AI assistant reading the transcript of a conversation between \
an AI and a human. Extract all of the proper nouns from the last line of \
the conversation. A proper noun is usually capitalized; always extract \
names of people and places.

The history is only there to resolve references such as \"him\" or \
\"that city\" in the last line. Ignore anything in the history that the \
last line does not mention.

Return a single comma-separated list, or NONE if there is nothing worth \
noting (for example a greeting or small talk).

Conversation history:
{{ history }}

Last line:
Human: {{ input }}
Output:";

/// Update one entity's summary from the last line.
pub const ENTITY_SUMMARIZATION: &str = "\
You are an AI assistant helping a human keep track of facts about the \
people, places and concepts in their life. Update the summary of the \
entity below using the last line of the conversation. If there is no \
summary yet, write a single sentence.

Only include facts about this entity that the last line states. If the \
last line says nothing new or worth remembering about it, return the \
existing summary unchanged.

Full conversation history (for context):
{{ history }}

Entity to summarize:
{{ entity }}

Existing summary of {{ entity }}:
{{ summary }}

Last line of conversation:
Human: {{ input }}
Updated summary:";

/// A minijinja prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: Cow<'static, str>,
}

impl PromptTemplate {
    /// Wrap a template source.
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The default conversation template.
    pub const fn conversation() -> Self {
        Self {
            source: Cow::Borrowed(CONVERSATION),
        }
    }

    /// The entity extraction template.
    pub const fn entity_extraction() -> Self {
        Self {
            source: Cow::Borrowed(ENTITY_EXTRACTION),
        }
    }

    /// The entity summarization template.
    pub const fn entity_summarization() -> Self {
        Self {
            source: Cow::Borrowed(ENTITY_SUMMARIZATION),
        }
    }

    /// The raw template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template with the given variables.
    pub fn render(&self, vars: impl Serialize) -> Result<String, minijinja::Error> {
        Environment::new().render_str(&self.source, vars)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::conversation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn conversation_renders_all_sections() {
        let prompt = PromptTemplate::conversation()
            .render(context! {
                entities => "Alice: Lives in Paris.",
                history => "Human: hi\nAI: hello",
                input => "Where does Alice live?",
            })
            .unwrap();
        assert!(prompt.contains("Context:\nAlice: Lives in Paris.\n"));
        assert!(prompt.contains("Current conversation:\nHuman: hi\nAI: hello\nLast line:"));
        assert!(prompt.ends_with("Human: Where does Alice live?\nYou:"));
    }

    #[test]
    fn no_html_escaping() {
        let prompt = PromptTemplate::new("{{ input }}")
            .render(context! { input => "<b>&</b>" })
            .unwrap();
        assert_eq!(prompt, "<b>&</b>");
    }
}
