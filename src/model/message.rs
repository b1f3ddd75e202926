/// How a story-log line is rendered in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry<'a> {
    /// Something the player did, without the `> ` marker.
    Action(&'a str),
    Narration(&'a str),
    /// Narration still being generated.
    Pending,
}

impl<'a> LogEntry<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.is_empty() {
            LogEntry::Pending
        } else if let Some(action) = line.strip_prefix("> ") {
            LogEntry::Action(action)
        } else {
            LogEntry::Narration(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_log_lines() {
        assert_eq!(LogEntry::classify("> Look around"), LogEntry::Action("Look around"));
        assert_eq!(LogEntry::classify("The tavern is dim..."), LogEntry::Narration("The tavern is dim..."));
        assert_eq!(LogEntry::classify(""), LogEntry::Pending);
    }
}
