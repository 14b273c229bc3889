use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uiforge::config::RunnerConfig;
use uiforge::generator::OfflineGenerator;
use uiforge::job::{ComponentLibrary, Job, PromptPart};
use uiforge::knowledge::KnowledgeStore;
use uiforge::repository::InMemoryJobStore;
use uiforge::runner::JobRunner;
use uiforge::server::{self, AppState};
use uuid::Uuid;

const LISTEN_ADDR: &str = "127.0.0.1:8630";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(InMemoryJobStore::new());
    let knowledge = Arc::new(KnowledgeStore::with_builtin());

    // Job creation belongs to an external collaborator; seed one demo job so
    // the run trigger has something to drive out of the box.
    let demo = Job::new(
        "Demo button",
        "create a Button component with a loading state",
        Uuid::new_v4(),
        ComponentLibrary::Antd,
        vec![PromptPart::text(
            "create a Button component with a loading state",
        )],
    );
    let demo_id = demo.id;
    store.insert_job(demo).await;
    tracing::info!(job_id = %demo_id, "seeded demo job, run it with GET /jobs/{{id}}/start");

    let runner = Arc::new(JobRunner::new(
        store,
        Arc::new(OfflineGenerator),
        knowledge.clone(),
        RunnerConfig::default(),
    ));

    server::serve(LISTEN_ADDR, AppState { runner, knowledge }).await
}
