//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_call};

/// Network actor that executes API calls and reports classified outcomes
pub struct NetworkActor {
    client: reqwest::Client,
    base_url: String,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(config: &Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(config.timeout()),
            base_url: config.base_url.clone(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, call }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            // Calls always run to completion; there is no cancellation
                            self.active_requests.spawn(async move {
                                tracing::info!(id, kind = ?call.kind(), "Executing call");
                                let outcome = execute_call(&client, &base_url, &call).await;
                                let _ = response_tx.send(NetworkResponse { id, outcome });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "call task failed");
                    }
                }
            }
        }
    }
}
