pub mod auth;
pub mod pipeline;

use anyhow::Result;

use crate::domain::models::PipelineBox;

pub struct PipelineManager {}

impl PipelineManager {
    pub fn get() -> Result<PipelineBox> {
        return Ok(Box::<pipeline::PipelineClient>::default());
    }
}
