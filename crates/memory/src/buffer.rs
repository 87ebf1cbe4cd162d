//! Rolling buffer of raw turns.

use llm::{Message, Role};

/// Every turn of the current chat, as alternating user/assistant messages.
///
/// Nothing is evicted; the window only limits how much of the tail is
/// folded into a prompt.
#[derive(Clone, Default, Debug)]
pub struct TurnBuffer {
    messages: Vec<Message>,
}

impl TurnBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn.
    pub fn push_turn(&mut self, input: &str, output: &str) {
        self.messages.push(Message::user(input));
        self.messages.push(Message::assistant(output));
    }

    /// The messages of the last `turns` turns.
    pub fn recent(&self, turns: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(turns * 2);
        &self.messages[start..]
    }

    /// Render the last `turns` turns as `Human:`/`AI:` lines.
    pub fn render(&self, turns: usize) -> String {
        self.recent(turns)
            .iter()
            .map(line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every buffered message as a labelled line.
    pub fn lines(&self) -> Vec<String> {
        self.messages.iter().map(line).collect()
    }

    /// Number of buffered turns.
    pub fn turns(&self) -> usize {
        self.messages.len() / 2
    }

    /// Drop every buffered turn.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

fn line(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "Human",
        Role::Assistant => "AI",
    };
    format!("{speaker}: {}", message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_keeps_only_the_window() {
        let mut buffer = TurnBuffer::new();
        for i in 0..5 {
            buffer.push_turn(&format!("q{i}"), &format!("a{i}"));
        }
        assert_eq!(buffer.turns(), 5);
        assert_eq!(buffer.render(2), "Human: q3\nAI: a3\nHuman: q4\nAI: a4");
        assert_eq!(buffer.lines().len(), 10);
    }

    #[test]
    fn window_larger_than_buffer() {
        let mut buffer = TurnBuffer::new();
        buffer.push_turn("hi", "hello");
        assert_eq!(buffer.recent(10).len(), 2);
        assert_eq!(TurnBuffer::new().render(3), "");
    }
}
