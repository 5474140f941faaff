use tui_textarea::Input;

use super::MessageId;
use super::SubmissionOutcome;

pub enum Event {
    PipelineOutcome(MessageId, SubmissionOutcome),
    PipelineFailed(MessageId),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
