use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use timetrack::{
    config::Config,
    notify::LogNotifier,
    services::{
        activation::activate,
        employees::{
            CreateEmployeeError, CreateEmployeeParameters, create_employee, list_employees,
        },
        projects::{CreateProjectError, CreateProjectParameters, create_project, list_projects},
        screenshots::{
            ScreenshotArchive, StoreScreenshotError, StoreScreenshotParameters, list_screenshots,
        },
        tasks::{ListTasksError, list_tasks, list_tasks_for_project},
        time_logs::{AppendTimeLogError, append_time_log, list_time_logs},
    },
    storage::{StorageError, json::JsonFileStorage},
    store::DocumentStore,
};

mod ui;

#[derive(Parser)]
#[command(
    name = "timetrack",
    about = "Employees, projects, time logs and screenshots in a single JSON store"
)]
struct Cli {
    /// Directory holding storage.json and the screenshot archive
    #[arg(long, env = "DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Print listings as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Inspect tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Record and list time logs
    #[command(subcommand)]
    Time(TimeCommands),

    /// Archive and list screenshots
    #[command(subcommand)]
    Screenshot(ScreenshotCommands),

    /// Activate an employee account and print the outcome page
    Activate { employee_id: String },
}

#[derive(Debug, Subcommand)]
enum EmployeeCommands {
    /// Register an employee and send the activation email
    Add { name: String, email: String },
    /// List employees
    List {
        /// Only activated employees
        #[arg(long)]
        active: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectCommands {
    /// Create a project along with its default task
    Add {
        name: String,
        /// Assign an employee (can be used multiple times)
        #[arg(short, long = "employee", action = clap::ArgAction::Append)]
        employee_ids: Vec<String>,
    },
    /// List all projects
    List,
}

#[derive(Debug, Subcommand)]
enum TaskCommands {
    /// List tasks
    List {
        /// Only tasks of this project
        #[arg(short, long)]
        project: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum TimeCommands {
    /// Append a time log given as a JSON object
    Log { payload: String },
    /// List all time logs
    List,
}

#[derive(Debug, Subcommand)]
enum ScreenshotCommands {
    /// Archive a PNG and record its metadata
    Add {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        employee_name: String,
        #[arg(long)]
        project_name: String,
        #[arg(long)]
        timestamp: String,
        #[arg(long)]
        permission: String,
        /// Image file to archive
        #[arg(long)]
        file: PathBuf,
    },
    /// List screenshot metadata
    List,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to prepare data directory '{path}': {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    CreateEmployee(#[from] CreateEmployeeError),

    #[error(transparent)]
    CreateProject(#[from] CreateProjectError),

    #[error(transparent)]
    ListTasks(#[from] ListTasksError),

    #[error(transparent)]
    AppendTimeLog(#[from] AppendTimeLogError),

    #[error(transparent)]
    StoreScreenshot(#[from] StoreScreenshotError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timetrack=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_env(cli.data_dir);
    config.ensure_dirs().map_err(|e| CliError::DataDir {
        path: config.data_dir.clone(),
        source: e,
    })?;

    let store = DocumentStore::open(JsonFileStorage::new(config.storage_path()))?;
    let json = cli.json;

    match cli.command {
        Commands::Employee(EmployeeCommands::Add { name, email }) => {
            let notifier = LogNotifier::new(config.sender_email.clone());
            let created = create_employee(
                &store,
                &notifier,
                &config,
                CreateEmployeeParameters { name, email },
            )?;
            if let Err(e) = &created.delivery {
                eprintln!("Warning: {}", e);
            }
            print_one(&created.employee)?;
        }
        Commands::Employee(EmployeeCommands::List { active }) => {
            let employees = list_employees(&store, active)?;
            if json {
                ui::render_json(&employees).map_err(CliError::Render)?;
            } else {
                ui::render_employees(&employees);
            }
        }
        Commands::Project(ProjectCommands::Add { name, employee_ids }) => {
            let created = create_project(&store, CreateProjectParameters { name, employee_ids })?;
            print_one(&created.project)?;
        }
        Commands::Project(ProjectCommands::List) => {
            let projects = list_projects(&store)?;
            if json {
                ui::render_json(&projects).map_err(CliError::Render)?;
            } else {
                ui::render_projects(&projects);
            }
        }
        Commands::Task(TaskCommands::List { project }) => {
            let tasks = match project {
                Some(project_id) => list_tasks_for_project(&store, &project_id)?,
                None => list_tasks(&store)?,
            };
            if json {
                ui::render_json(&tasks).map_err(CliError::Render)?;
            } else {
                ui::render_tasks(&tasks);
            }
        }
        Commands::Time(TimeCommands::Log { payload }) => {
            let payload = serde_json::from_str(&payload).map_err(CliError::Payload)?;
            let ack = append_time_log(&store, payload)?;
            print_one(&ack)?;
        }
        Commands::Time(TimeCommands::List) => {
            let time_logs = list_time_logs(&store)?;
            if json {
                ui::render_json(&time_logs).map_err(CliError::Render)?;
            } else {
                ui::render_time_logs(&time_logs).map_err(CliError::Render)?;
            }
        }
        Commands::Screenshot(ScreenshotCommands::Add {
            employee_id,
            employee_name,
            project_name,
            timestamp,
            permission,
            file,
        }) => {
            let bytes = fs::read(&file).map_err(|e| CliError::ReadInput {
                path: file.clone(),
                source: e,
            })?;
            let archive = ScreenshotArchive::new(config.data_dir.clone());
            let record = archive.store(
                &store,
                StoreScreenshotParameters {
                    employee_id,
                    employee_name,
                    project_name,
                    timestamp,
                    permission,
                    bytes,
                },
            )?;
            if json {
                ui::render_json(&record).map_err(CliError::Render)?;
            } else {
                println!("Screenshot saved to {}", archive.resolve(&record).display());
            }
        }
        Commands::Screenshot(ScreenshotCommands::List) => {
            let screenshots = list_screenshots(&store)?;
            if json {
                ui::render_json(&screenshots).map_err(CliError::Render)?;
            } else {
                ui::render_screenshots(&screenshots);
            }
        }
        Commands::Activate { employee_id } => {
            let result = activate(&store, &employee_id)?;
            println!("{}", result.render_page(&config));
        }
    }

    Ok(())
}

/// Created entities are always echoed as JSON; `--json` only changes listings.
fn print_one<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    ui::render_json(value).map_err(CliError::Render)
}
