//! Document processing workflow for one project
//!
//! Composes the client, a [`BatchEditReconciler`] and a [`TaskPoller`]:
//! pick a project, stage edits, submit them, follow the server task and
//! fetch the processed PDF.

use crate::config::PollingSettings;
use crate::core::batch::{BatchEditReconciler, NamingContext};
use crate::core::task::{PollHandle, PollOptions, PollOutcome, Task, TaskPoller};
use crate::sdk::errors::{Result, SDKError, fallback};
use crate::sdk::types::{Project, TaskAccepted};
use crate::sdk::ApiClient;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Result of a submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server started a job; it is being polled
    Tracking { task_id: String },
    /// The server answered synchronously
    Completed(TaskAccepted),
}

/// Which job a poll follows
#[derive(Debug, Clone, Copy)]
enum Flow {
    Process,
    Reorder,
}

/// Controller for the document processing screen
#[derive(Debug)]
pub struct DocumentProcessor {
    client: ApiClient,
    polling: PollingSettings,
    project: Option<Project>,
    edits: BatchEditReconciler,
    poll: Option<PollHandle>,
}

impl DocumentProcessor {
    pub fn new(client: ApiClient, polling: PollingSettings) -> Self {
        Self {
            client,
            polling,
            project: None,
            edits: BatchEditReconciler::new(),
            poll: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Selected project
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn edits(&self) -> &BatchEditReconciler {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut BatchEditReconciler {
        &mut self.edits
    }

    /// Switch to `project` and load its documents. Any running poll is
    /// cancelled.
    pub async fn select_project(&mut self, project: Project) -> Result<()> {
        self.cancel();
        info!("Selected project {} ({})", project.name, project.id);
        self.edits = BatchEditReconciler::new();
        self.project = Some(project);
        self.refresh().await
    }

    /// Fetch the project then select it
    pub async fn select_project_by_id(&mut self, project_id: &str) -> Result<()> {
        let project = self.client.get_project(project_id).await.inspect_err(|e| {
            error!("{}", e.user_message(fallback::FETCH_PROJECTS));
        })?;
        self.select_project(project).await
    }

    /// Reload documents from the server, dropping staged edits
    pub async fn refresh(&mut self) -> Result<()> {
        let project_id = self.require_project()?.id.clone();
        self.edits
            .reset(&self.client, &project_id)
            .await
            .inspect_err(|e| error!("{}", e.user_message(fallback::FETCH_DOCUMENTS)))?;
        info!("Loaded {} documents", self.edits.len());
        Ok(())
    }

    /// Rename every document from `pattern`, dated today
    pub fn apply_name_pattern(&mut self, pattern: &str) -> Result<usize> {
        let context = NamingContext::today(self.require_project()?.name.clone());
        self.edits.apply_name_pattern(pattern, &context)
    }

    /// Submit the staged edits.
    ///
    /// Nothing is sent when no document has a pending change. When the
    /// server starts a job it is polled with the processing interval and
    /// timeout; the callbacks behave as in [`TaskPoller::start`].
    pub async fn submit_changes<U, T>(&mut self, on_update: U, on_terminal: T) -> Result<SubmitOutcome>
    where
        U: Fn(&Task) + Send + 'static,
        T: FnOnce(Task) + Send + 'static,
    {
        let project_id = self.require_project()?.id.clone();
        if !self.edits.has_any_change() {
            return Err(SDKError::Validation(
                "No hay cambios pendientes para procesar".to_string(),
            ));
        }

        let accepted = self
            .client
            .process_rename_reorder(&project_id, &self.edits.diff())
            .await
            .inspect_err(|e| error!("{}", e.user_message(fallback::PROCESS_DOCUMENTS)))?;

        Ok(self.track(Flow::Process, &project_id, accepted, on_update, on_terminal))
    }

    /// Submit free-text reorder instructions and follow the reorder job
    pub async fn submit_instructions<U, T>(
        &mut self,
        instructions: &str,
        on_update: U,
        on_terminal: T,
    ) -> Result<SubmitOutcome>
    where
        U: Fn(&Task) + Send + 'static,
        T: FnOnce(Task) + Send + 'static,
    {
        let project_id = self.require_project()?.id.clone();

        let accepted = self
            .client
            .start_reorder(&project_id, instructions)
            .await
            .inspect_err(|e| {
                if !e.is_validation() {
                    error!("{}", e.user_message(fallback::PROCESS_DOCUMENTS));
                }
            })?;

        Ok(self.track(Flow::Reorder, &project_id, accepted, on_update, on_terminal))
    }

    fn track<U, T>(
        &mut self,
        flow: Flow,
        project_id: &str,
        accepted: TaskAccepted,
        on_update: U,
        on_terminal: T,
    ) -> SubmitOutcome
    where
        U: Fn(&Task) + Send + 'static,
        T: FnOnce(Task) + Send + 'static,
    {
        let Some(task_id) = accepted.task_id.clone() else {
            info!("Server finished the request synchronously");
            return SubmitOutcome::Completed(accepted);
        };

        // A new job replaces the one being watched
        self.cancel();

        let client = self.client.clone();
        let project_id = project_id.to_string();
        let (options, handle) = match flow {
            Flow::Process => {
                let options = PollOptions::for_processing(&self.polling);
                let fetcher = move |task_id: String| {
                    let client = client.clone();
                    let project_id = project_id.clone();
                    async move { client.process_status(&project_id, &task_id).await }
                };
                (options, TaskPoller::new(options).start(&task_id, fetcher, on_update, on_terminal))
            }
            Flow::Reorder => {
                let options = PollOptions::for_reorder(&self.polling);
                let fetcher = move |task_id: String| {
                    let client = client.clone();
                    let project_id = project_id.clone();
                    async move { client.reorder_status(&project_id, &task_id).await }
                };
                (options, TaskPoller::new(options).start(&task_id, fetcher, on_update, on_terminal))
            }
        };

        info!("Tracking {:?} task {} every {:?}", flow, task_id, options.interval);
        self.poll = Some(handle);
        SubmitOutcome::Tracking { task_id }
    }

    /// Whether a poll is still running
    pub fn is_tracking(&self) -> bool {
        self.poll.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the current poll to end. `None` when nothing was tracked.
    pub async fn wait(&mut self) -> Option<PollOutcome> {
        let handle = self.poll.take()?;
        Some(handle.wait().await)
    }

    /// Stop following the current task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.poll.take() {
            if !handle.is_finished() {
                info!("Cancelling task {}", handle.task_id());
            }
            handle.cancel();
        }
    }

    /// `<project>_procesado_<YYYY-MM-DD>.pdf`
    pub fn result_file_name(&self, date: NaiveDate) -> Result<String> {
        let project = self.require_project()?;
        let stem: String = project
            .name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        Ok(format!("{}_procesado_{}.pdf", stem, date.format("%Y-%m-%d")))
    }

    /// Save the artifact of a completed task into `dir`
    pub async fn download_result(&self, task: &Task, dir: &Path) -> Result<PathBuf> {
        let locator = match (&task.download_url, task.is_completed()) {
            (Some(locator), true) => locator,
            _ => {
                return Err(SDKError::Validation(
                    "La tarea no tiene un archivo procesado para descargar".to_string(),
                ));
            }
        };

        let dest = dir.join(self.result_file_name(Local::now().date_naive())?);
        self.client
            .download_to(locator, &dest)
            .await
            .inspect_err(|e| warn!("{}", e.user_message(fallback::DOWNLOAD)))?;
        Ok(dest)
    }

    fn require_project(&self) -> Result<&Project> {
        self.project
            .as_ref()
            .ok_or_else(|| SDKError::Validation("Seleccione un proyecto".to_string()))
    }
}
