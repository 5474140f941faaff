use std::collections::HashMap;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::MessageId;
use crate::infrastructure::http::PipelineManager;

pub struct OrchestratorService {}

impl OrchestratorService {
    /// Drives pipeline submissions off the UI thread. Workers are keyed
    /// by placeholder id so a new chat can abort everything in flight;
    /// each one reports back as an event carrying that id.
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut workers: HashMap<MessageId, JoinHandle<Result<()>>> = HashMap::new();

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            match event.unwrap() {
                Action::PipelineAbortAll() => {
                    for (_, worker) in workers.drain() {
                        worker.abort();
                    }
                }
                Action::PipelineSubmit(request) => {
                    workers.retain(|_, worker| return !worker.is_finished());

                    let worker_tx = tx.clone();
                    let placeholder_id = request.placeholder_id;
                    let worker = tokio::spawn(async move {
                        let res = PipelineManager::get()?.run(request).await;
                        match res {
                            Ok(outcome) => {
                                worker_tx.send(Event::PipelineOutcome(placeholder_id, outcome))?;
                            }
                            Err(err) => {
                                tracing::error!(error = ?err, placeholder_id, "pipeline submission failed");
                                worker_tx.send(Event::PipelineFailed(placeholder_id))?;
                            }
                        }

                        return Ok(());
                    });

                    workers.insert(placeholder_id, worker);
                }
            }
        }
    }
}
