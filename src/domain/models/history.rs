#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
use chrono::Local;

const TITLE_MAX_CHARS: usize = 50;

/// A locally held descriptor of a past conversation thread. Summaries are
/// never persisted server-side; they live for the duration of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSummary {
    pub id: u64,
    pub title: String,
    pub timestamp: String,
    pub preview: String,
}

#[derive(Default)]
pub struct ChatHistory {
    entries: Vec<ChatSummary>,
    current: Option<u64>,
    next_id: u64,
}

impl ChatHistory {
    pub fn entries(&self) -> &[ChatSummary] {
        return &self.entries;
    }

    pub fn current(&self) -> Option<u64> {
        return self.current;
    }

    /// Synthesizes a summary for a new thread from its first submission
    /// and marks it current. Newest entries go first.
    pub fn begin_thread(&mut self, text: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        let mut title = text.chars().take(TITLE_MAX_CHARS).collect::<String>();
        if text.chars().count() > TITLE_MAX_CHARS {
            title += "...";
        }

        self.entries.insert(
            0,
            ChatSummary {
                id,
                title,
                timestamp: Local::now().format("%b %e, %H:%M").to_string(),
                preview: text.to_string(),
            },
        );
        self.current = Some(id);

        return id;
    }

    pub fn select(&mut self, id: u64) {
        if self.entries.iter().any(|entry| return entry.id == id) {
            self.current = Some(id);
        }
    }

    /// Removes a summary by id. Deleting the current thread only clears
    /// the pointer; the live conversation log is untouched. Idempotent.
    pub fn delete(&mut self, id: u64) {
        self.entries.retain(|entry| return entry.id != id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}
