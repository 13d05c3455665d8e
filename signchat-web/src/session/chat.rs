//! Teacher/student message history

/// The two sides of a conversation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }

    pub fn peer(&self) -> Role {
        match self {
            Role::Teacher => Role::Student,
            Role::Student => Role::Teacher,
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.to_ascii_lowercase().as_str() {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// False when an outbound message could not be handed to the channel
    pub delivered: bool,
}

impl ChatMessage {
    /// `"Teacher: hello"`
    pub fn line(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    coalesce: bool,
}

impl ChatHistory {
    pub fn new(coalesce: bool) -> Self {
        Self {
            messages: Vec::new(),
            coalesce,
        }
    }

    /// Record a message. With coalescing on, a message from the same role
    /// as the previous entry extends that entry instead of adding one.
    pub fn push(&mut self, role: Role, text: &str, delivered: bool) {
        if self.coalesce {
            if let Some(last) = self.messages.last_mut() {
                if last.role == role {
                    last.text.push(' ');
                    last.text.push_str(text);
                    last.delivered &= delivered;
                    return;
                }
            }
        }

        self.messages.push(ChatMessage {
            role,
            text: text.to_string(),
            delivered,
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Per-role pane
    pub fn from_role(&self, role: Role) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(move |m| m.role == role)
    }

    pub fn lines(&self) -> Vec<String> {
        self.messages.iter().map(ChatMessage::line).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_carry_role_label() {
        let mut history = ChatHistory::new(false);
        history.push(Role::Teacher, "hello", true);
        history.push(Role::Student, "HI", true);
        assert_eq!(history.lines(), vec!["Teacher: hello", "Student: HI"]);
    }

    #[test]
    fn test_without_coalescing_every_message_is_kept() {
        let mut history = ChatHistory::new(false);
        history.push(Role::Student, "A", true);
        history.push(Role::Student, "B", true);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_coalescing_merges_same_role_runs() {
        let mut history = ChatHistory::new(true);
        history.push(Role::Student, "HEL", true);
        history.push(Role::Student, "LO", false);
        history.push(Role::Teacher, "good", true);
        history.push(Role::Student, "BYE", true);

        assert_eq!(history.lines(), vec!["Student: HEL LO", "Teacher: good", "Student: BYE"]);
        assert!(!history.messages()[0].delivered);
    }

    #[test]
    fn test_role_panes() {
        let mut history = ChatHistory::new(false);
        history.push(Role::Teacher, "one", true);
        history.push(Role::Student, "two", true);
        history.push(Role::Teacher, "three", true);

        let teacher: Vec<_> = history.from_role(Role::Teacher).map(|m| m.text.as_str()).collect();
        assert_eq!(teacher, vec!["one", "three"]);
    }

    #[test]
    fn test_role_parse_and_peer() {
        assert_eq!(Role::parse("Teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Teacher.peer(), Role::Student);
    }
}
