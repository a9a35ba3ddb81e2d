//! `pergaminos` command line

mod commands;

pub use commands::run;

use crate::config::ClientConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pergaminos document digitization client
#[derive(Parser, Debug)]
#[command(name = "pergaminos", version, about = "Pergaminos document digitization client")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "PERGAMINOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// API base URL, including the `/api` prefix
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "PERGAMINOS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged in user
    Whoami,
    /// Create the default administrator account
    InitAdmin,
    /// List companies
    Companies,
    /// Create a company
    CreateCompany(CreateCompanyArgs),
    /// List projects
    Projects {
        /// Only projects of this company
        #[arg(long)]
        company: Option<String>,
    },
    /// Create a project
    CreateProject(CreateProjectArgs),
    /// List the documents of a project
    Documents { project: String },
    /// Upload PDF files into a project
    Upload {
        project: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Rename a single document
    Rename { document: String, name: String },
    /// Rename and reorder a project's documents, then download the result
    Process(ProcessArgs),
    /// Reorder a project's documents from free-text instructions
    Reorder(ReorderArgs),
    /// Show the status of a server task
    Status {
        project: String,
        task: String,
        /// The task is a semantic reorder
        #[arg(long)]
        reorder: bool,
    },
    /// Ask a question about a project's extracted data
    Ask {
        project: String,
        question: String,
        /// Do not send document context
        #[arg(long)]
        no_context: bool,
    },
    /// Dashboard counters
    Stats,
    /// List users
    Users,
    /// Enable a user account
    EnableUser { user: String },
    /// Disable a user account
    DisableUser { user: String },
    /// List QA agents
    QaAgents,
    /// Run a QA agent
    RunQaAgent { agent: String },
}

#[derive(Args, Debug)]
pub struct CreateCompanyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateProjectArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Default semantic instructions for the project
    #[arg(long)]
    pub instructions: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    pub project: String,
    /// Rename pattern, e.g. `DOC_{numero}_{fecha}`
    #[arg(long)]
    pub pattern: Option<String>,
    /// Ordering rule, e.g. `alfabético` or `por fecha`
    #[arg(long)]
    pub order: Option<String>,
    /// Directory for the processed PDF
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Submit without waiting for the task
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug)]
pub struct ReorderArgs {
    pub project: String,
    #[arg(short, long)]
    pub instructions: String,
    /// Directory for the processed PDF
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    #[arg(long)]
    pub no_wait: bool,
}

impl Cli {
    /// Configuration from `--config` (or defaults), the environment and
    /// command line overrides, in that order
    pub async fn load_config(&self) -> crate::sdk::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path).await?.apply_env()?,
            None => ClientConfig::from_env()?,
        };

        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
        if config.session.token_path.is_none() {
            config.session.token_path = default_token_path();
        }

        config.validate_all()?;
        Ok(config)
    }
}

/// `$HOME/.pergaminos/token`
fn default_token_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".pergaminos").join("token"))
}
