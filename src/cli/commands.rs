//! Command handlers

use super::{Cli, Command, CreateCompanyArgs, CreateProjectArgs, ProcessArgs, ReorderArgs};
use crate::config::ClientConfig;
use crate::core::processor::{DocumentProcessor, SubmitOutcome};
use crate::core::task::{PollOutcome, Task};
use crate::sdk::errors::fallback;
use crate::sdk::types::{NewCompany, NewProject};
use crate::sdk::{ApiClient, SDKError};
use anyhow::{Context, bail};
use std::path::Path;
use tracing::{debug, warn};

/// Execute the parsed command
pub async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config)?;

    if !matches!(cli.command, Command::Login { .. } | Command::InitAdmin) {
        client.session().restore().context("No se pudo leer la sesión guardada")?;
    }

    match cli.command {
        Command::Login { email, password } => {
            let user = client
                .login(&email, &password)
                .await
                .map_err(|e| user_error(e, fallback::LOGIN))?;
            println!("Sesión iniciada como {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            client.logout();
            println!("Sesión cerrada");
        }
        Command::Whoami => match client.bootstrap().await? {
            Some(user) => println!("{} <{}> ({:?})", user.name, user.email, user.role),
            None => bail!(fallback::SESSION),
        },
        Command::InitAdmin => {
            let response = client.init_admin().await?;
            println!("{}", response.message);
            if let (Some(email), Some(password)) = (response.email, response.password) {
                println!("Usuario: {email}\nContraseña: {password}");
            }
        }
        Command::Companies => {
            let companies = client
                .list_companies()
                .await
                .map_err(|e| user_error(e, fallback::FETCH_COMPANIES))?;
            for company in companies {
                println!("{}\t{}", company.id, company.name);
            }
        }
        Command::CreateCompany(args) => create_company(&client, args).await?,
        Command::Projects { company } => {
            let projects = client
                .list_projects()
                .await
                .map_err(|e| user_error(e, fallback::FETCH_PROJECTS))?;
            for project in projects
                .iter()
                .filter(|p| company.as_ref().is_none_or(|c| &p.company_id == c))
            {
                println!(
                    "{}\t{}\t{}",
                    project.id,
                    project.name,
                    project.status.as_deref().unwrap_or("-")
                );
            }
        }
        Command::CreateProject(args) => create_project(&client, args).await?,
        Command::Documents { project } => {
            let documents = client
                .list_documents(&project)
                .await
                .map_err(|e| user_error(e, fallback::FETCH_DOCUMENTS))?;
            for document in documents {
                println!(
                    "{}\t{}\t{:?}\t{}",
                    document.id,
                    document
                        .display_order
                        .map_or_else(|| "-".to_string(), |o| o.to_string()),
                    document.status,
                    document.original_filename
                );
            }
        }
        Command::Upload { project, files } => {
            for file in files {
                let document = client
                    .upload_document(&project, &file)
                    .await
                    .map_err(|e| user_error(e, fallback::UPLOAD_DOCUMENT))
                    .with_context(|| file.display().to_string())?;
                println!("{}\t{}", document.id, document.original_filename);
            }
        }
        Command::Rename { document, name } => {
            let document = client
                .rename_document(&document, &name)
                .await
                .map_err(|e| user_error(e, fallback::RENAME_DOCUMENT))?;
            println!("{}\t{}", document.id, document.original_filename);
        }
        Command::Process(args) => process(client, config, args).await?,
        Command::Reorder(args) => reorder(client, config, args).await?,
        Command::Status {
            project,
            task,
            reorder,
        } => {
            let task = if reorder {
                client.reorder_status(&project, &task).await
            } else {
                client.process_status(&project, &task).await
            }
            .map_err(|e| user_error(e, fallback::PROCESS_STATUS))?;
            print_task(&task);
        }
        Command::Ask {
            project,
            question,
            no_context,
        } => {
            let response = client
                .ask_ai(&project, &question, !no_context)
                .await
                .map_err(|e| user_error(e, fallback::ASK_AI))?;
            println!("{}", response.answer);
            if !response.sources.is_empty() {
                println!("\nFuentes: {}", response.sources.len());
            }
        }
        Command::Stats => {
            let stats = client
                .dashboard_stats()
                .await
                .map_err(|e| user_error(e, fallback::DASHBOARD))?;
            if let Some(error) = stats.error {
                bail!(error);
            }
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Users => {
            let users = client
                .list_users()
                .await
                .map_err(|e| user_error(e, fallback::FETCH_USERS))?;
            for user in users {
                println!(
                    "{}\t{}\t{:?}\t{}",
                    user.id,
                    user.email,
                    user.role,
                    if user.is_active { "activo" } else { "inactivo" }
                );
            }
        }
        Command::EnableUser { user } => set_active(&client, &user, true).await?,
        Command::DisableUser { user } => set_active(&client, &user, false).await?,
        Command::QaAgents => {
            let agents = client
                .list_qa_agents()
                .await
                .map_err(|e| user_error(e, fallback::QA_AGENTS))?;
            for agent in agents {
                let scope = if agent.is_universal {
                    "universal".to_string()
                } else {
                    format!("{} proyectos", agent.project_ids.len())
                };
                println!("{}\t{}\t{}", agent.id, agent.name, scope);
            }
        }
        Command::RunQaAgent { agent } => {
            let accepted = client
                .run_qa_agent(&agent)
                .await
                .map_err(|e| user_error(e, fallback::QA_AGENTS))?;
            match accepted.task_id {
                Some(task_id) => println!("Tarea iniciada: {task_id}"),
                None => println!("{}", accepted.message.unwrap_or_default()),
            }
        }
    }

    Ok(())
}

/// Error carrying the message shown to the user
fn user_error(error: SDKError, fallback: &str) -> anyhow::Error {
    debug!("{:?}", error);
    anyhow::anyhow!(error.user_message(fallback))
}

async fn create_company(client: &ApiClient, args: CreateCompanyArgs) -> anyhow::Result<()> {
    let company = client
        .create_company(&NewCompany {
            name: args.name,
            description: args.description,
            contact_email: args.email,
            contact_phone: args.phone,
            address: args.address,
        })
        .await
        .map_err(|e| user_error(e, fallback::CREATE_COMPANY))?;
    println!("{}\t{}", company.id, company.name);
    Ok(())
}

async fn create_project(client: &ApiClient, args: CreateProjectArgs) -> anyhow::Result<()> {
    let project = client
        .create_project(&NewProject {
            name: args.name,
            company_id: args.company,
            description: args.description,
            semantic_instructions: args.instructions,
        })
        .await
        .map_err(|e| user_error(e, fallback::CREATE_PROJECT))?;
    println!("{}\t{}", project.id, project.name);
    Ok(())
}

async fn set_active(client: &ApiClient, user: &str, active: bool) -> anyhow::Result<()> {
    client
        .set_user_active(user, active)
        .await
        .map_err(|e| user_error(e, fallback::UPDATE_USER))?;
    println!("{} {}", user, if active { "activado" } else { "desactivado" });
    Ok(())
}

async fn process(client: ApiClient, config: ClientConfig, args: ProcessArgs) -> anyhow::Result<()> {
    let mut processor = DocumentProcessor::new(client, config.polling);
    processor
        .select_project_by_id(&args.project)
        .await
        .map_err(|e| user_error(e, fallback::FETCH_DOCUMENTS))?;

    if let Some(pattern) = &args.pattern {
        processor.apply_name_pattern(pattern)?;
    }
    if let Some(order) = &args.order {
        if processor.edits_mut().apply_order_rule(order).is_none() {
            warn!("Regla de orden no reconocida: {}", order);
        }
    }

    for entity in processor.edits().sorted_by_pending_order() {
        let marker = if entity.has_change() { "*" } else { " " };
        println!(
            "{marker} {:>3}  {}  <- {}",
            entity.pending.order, entity.pending.name, entity.baseline.name
        );
    }

    let outcome = processor
        .submit_changes(print_task, |_| {})
        .await
        .map_err(|e| user_error(e, fallback::PROCESS_DOCUMENTS))?;
    finish(processor, outcome, &args.out, args.no_wait).await
}

async fn reorder(client: ApiClient, config: ClientConfig, args: ReorderArgs) -> anyhow::Result<()> {
    let mut processor = DocumentProcessor::new(client, config.polling);
    processor
        .select_project_by_id(&args.project)
        .await
        .map_err(|e| user_error(e, fallback::FETCH_DOCUMENTS))?;

    let outcome = processor
        .submit_instructions(&args.instructions, print_task, |_| {})
        .await
        .map_err(|e| user_error(e, fallback::PROCESS_DOCUMENTS))?;
    finish(processor, outcome, &args.out, args.no_wait).await
}

async fn finish(
    mut processor: DocumentProcessor,
    outcome: SubmitOutcome,
    out: &Path,
    no_wait: bool,
) -> anyhow::Result<()> {
    let task_id = match outcome {
        SubmitOutcome::Completed(accepted) => {
            println!("{}", accepted.message.as_deref().unwrap_or("Procesamiento completado"));
            return Ok(());
        }
        SubmitOutcome::Tracking { task_id } => task_id,
    };

    println!("Tarea {task_id} en curso");
    if no_wait {
        processor.cancel();
        return Ok(());
    }

    match processor.wait().await {
        Some(PollOutcome::Completed(task)) if task.download_url.is_some() => {
            let path = processor
                .download_result(&task, out)
                .await
                .map_err(|e| user_error(e, fallback::DOWNLOAD))?;
            println!("Archivo procesado: {}", path.display());
            Ok(())
        }
        Some(PollOutcome::Completed(_)) => {
            println!("Procesamiento completado");
            Ok(())
        }
        Some(PollOutcome::Failed(task)) | Some(PollOutcome::TimedOut(task)) => bail!(
            task.error
                .unwrap_or_else(|| fallback::PROCESS_DOCUMENTS.to_string())
        ),
        Some(PollOutcome::Cancelled) | None => bail!("Seguimiento de la tarea {task_id} cancelado"),
    }
}

fn print_task(task: &Task) {
    match (&task.error, &task.message) {
        (Some(error), _) => println!("[{:>3}%] {:?}: {}", task.percent(), task.status, error),
        (None, Some(message)) => println!("[{:>3}%] {:?}: {}", task.percent(), task.status, message),
        (None, None) => println!("[{:>3}%] {:?}", task.percent(), task.status),
    }
}
