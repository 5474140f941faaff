use super::PipelineRequest;

pub enum Action {
    PipelineSubmit(PipelineRequest),
    PipelineAbortAll(),
}
