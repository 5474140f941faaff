#[cfg(test)]
#[path = "stage_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    Pending,
    Active,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub description: &'static str,
    pub status: StageStatus,
}

impl Stage {
    fn new(name: &'static str, description: &'static str) -> Stage {
        return Stage {
            name,
            description,
            status: StageStatus::Pending,
        };
    }
}

/// The progress list shown next to the conversation. Transitions keep at
/// most one stage active; a failure freezes the board for the submission.
#[derive(Clone)]
pub struct StageBoard {
    stages: Vec<Stage>,
}

impl Default for StageBoard {
    fn default() -> StageBoard {
        return StageBoard {
            stages: vec![
                Stage::new("Context Analyzer", "Understanding request"),
                Stage::new("Web Search Agent", "Executing search query"),
                Stage::new("Data Synthesis", "Waiting to process"),
                Stage::new("Response Generator", "Ready to format"),
            ],
        };
    }
}

impl StageBoard {
    pub fn stages(&self) -> &[Stage] {
        return &self.stages;
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.status = StageStatus::Pending;
        }
    }

    /// Applied synchronously when a submission is sent off: the analyzer
    /// completes immediately and the search stage becomes the active one.
    pub fn begin(&mut self) {
        self.reset();
        self.stages[0].status = StageStatus::Completed;
        self.stages[1].status = StageStatus::Active;
    }

    /// Moves the active stage to completed and activates the next pending
    /// one, if any.
    pub fn advance(&mut self) {
        let Some(idx) = self.active_index() else {
            return;
        };

        self.stages[idx].status = StageStatus::Completed;
        if let Some(next) = self.stages.get_mut(idx + 1) {
            next.status = StageStatus::Active;
        }
    }

    pub fn complete_all(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.status = StageStatus::Completed;
        }
    }

    /// Failure is terminal for the submission: the active stage flips to
    /// failed and nothing after it progresses.
    pub fn fail_active(&mut self) {
        if let Some(idx) = self.active_index() {
            self.stages[idx].status = StageStatus::Failed;
        }
    }

    pub fn is_processing(&self) -> bool {
        return self.active_index().is_some();
    }

    pub fn active(&self) -> Option<&Stage> {
        return self.active_index().map(|idx| return &self.stages[idx]);
    }

    fn active_index(&self) -> Option<usize> {
        return self
            .stages
            .iter()
            .position(|stage| return stage.status == StageStatus::Active);
    }
}
