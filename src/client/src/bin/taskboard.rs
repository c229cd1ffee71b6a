//! Taskboard command-line client

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use taskboard_authz::{AccessControl, AccessGate, AuthzEngine, DenialMode, GateOutcome, RouteDecision, RouteGuard};
use taskboard_client::adapter::PageRequest;
use taskboard_client::{
    load_dashboard, ApiClient, ClientConfig, ClientError, FileSessionStore, KanbanBoard,
    SessionManager, TaskDraft, TaskFilter,
};
use taskboard_core::{PermissionKey, Priority, Role, TaskStatus, TaskType};
use tracing::{debug, info};

/// Taskboard CLI
#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Task management client with role-based access")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Task API base URL (overrides config)
    #[arg(long, env = "TASKBOARD_API_URI")]
    api_uri: Option<String>,

    /// Session file (overrides config)
    #[arg(long)]
    session: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Show the signed-in user and their permissions
    Whoami,

    /// Task operations
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Show tasks as a kanban board
    Board,

    /// Task metrics (admin only)
    Metrics,

    /// User operations
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand)]
enum TaskCommand {
    /// List tasks, one page at a time
    List(ListArgs),

    /// Create a task
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Assignee user id
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD or date-time)
        #[arg(long)]
        due: Option<String>,

        /// low | medium | high
        #[arg(long)]
        priority: Option<Priority>,

        /// landing_page | edicao | api | manutencao | urgente
        #[arg(long = "type")]
        task_type: Option<TaskType>,
    },

    /// Move a task to another column
    Move {
        id: String,

        /// todo | in_progress | completed
        status: TaskStatus,
    },

    /// Delete a task
    Delete { id: String },
}

#[derive(Args)]
struct ListArgs {
    /// todo | in_progress | completed
    #[arg(long)]
    status: Option<TaskStatus>,

    /// Only tasks assigned to this user id
    #[arg(long)]
    assignee: Option<String>,

    /// Only tasks whose title contains this text
    #[arg(long)]
    title: Option<String>,

    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = taskboard_client::adapter::DEFAULT_PAGE_LIMIT)]
    limit: u32,
}

impl ListArgs {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            responsible_id: self.assignee.clone(),
            title: self.title.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Subcommand)]
enum UserCommand {
    /// List users
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .init();

    let config = load_config(&cli)?;
    let store = Arc::new(FileSessionStore::new(config.session.path.clone()));
    let api = ApiClient::new(&config, store)?;
    let manager = SessionManager::new(api, Arc::new(AuthzEngine::new()));

    match run(&manager, cli.command).await {
        Err(e) if matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Unauthorized)) => {
            bail!("Session expired or invalid. Run `taskboard login` again.")
        }
        Err(e) => match e.downcast_ref::<ClientError>() {
            Some(ClientError::Validation(errors)) => {
                for (field, message) in errors.iter() {
                    eprintln!("  {}: {}", field, message);
                }
                bail!("Invalid input")
            }
            _ => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = ClientConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => ClientConfig::default(),
    };

    // Apply CLI overrides
    if let Some(api_uri) = &cli.api_uri {
        config.api.base_url = api_uri.clone();
    }
    if let Some(session) = &cli.session {
        config.session.path = session.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run(manager: &SessionManager, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = manager.login(&email, &password).await?;
            println!(
                "Signed in as {} <{}> ({})",
                session.user().name,
                session.user().email,
                session.role()
            );
            Ok(())
        }
        Command::Logout => {
            manager.logout()?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            let session = resume(manager).await?;
            let user = session.user();
            println!("{} <{}>", user.name, user.email);
            println!("role: {}", session.role());
            if let Some(position) = &user.position {
                println!("position: {}", position);
            }
            for (group, permissions) in session.permissions_by_group() {
                let keys: Vec<_> = permissions.iter().map(|p| p.key.as_str()).collect();
                println!("{}: {}", group, keys.join(", "));
            }
            Ok(())
        }
        Command::Tasks(command) => run_tasks(manager, command).await,
        Command::Board => {
            resume(manager).await?;
            guard(manager, RouteGuard::require(PermissionKey::TasksList))?;

            let tasks = manager
                .guarded(manager.api().list_tasks(&TaskFilter::default()))
                .await?;
            print_board(manager.engine().as_ref(), &KanbanBoard::new(tasks));
            Ok(())
        }
        Command::Metrics => {
            resume(manager).await?;
            guard(manager, RouteGuard::require(Role::Admin))?;

            let dashboard = manager
                .guarded(load_dashboard(manager.api(), &TaskFilter::default()))
                .await?;
            let metrics = &dashboard.metrics;
            println!("tasks: {}", metrics.total);
            for status in TaskStatus::ALL {
                println!("  {}: {}", status, metrics.counts.get(status));
            }
            println!("completion rate: {:.1}%", metrics.completion_rate);
            println!("average per user: {:.1}", metrics.average_per_user);
            for stats in &metrics.per_user {
                println!(
                    "  {}: {} total, {} completed",
                    stats.name, stats.total, stats.counts.completed
                );
            }
            Ok(())
        }
        Command::Users(UserCommand::List) => {
            resume(manager).await?;
            guard(manager, RouteGuard::require(PermissionKey::UsersList))?;

            let users = manager.guarded(manager.api().list_users()).await?;
            for user in users {
                println!("{}\t{}\t{}\t{}", user.id, user.name, user.email, user.role);
            }
            Ok(())
        }
    }
}

async fn run_tasks(manager: &SessionManager, command: TaskCommand) -> Result<()> {
    resume(manager).await?;
    let api = manager.api();

    match command {
        TaskCommand::List(args) => {
            guard(manager, RouteGuard::require(PermissionKey::TasksList))?;

            let page = manager
                .guarded(api.list_tasks_page(&args.filter(), args.page_request()))
                .await?;

            for task in &page.data {
                println!(
                    "{}\t{}\t{}\t{}",
                    task.id,
                    task.status,
                    task.due_date.as_deref().unwrap_or("-"),
                    task.title
                );
            }
            println!("page {} of {} ({} tasks)", page.page, page.last_page, page.total);
        }
        TaskCommand::Create {
            title,
            description,
            assignee,
            due,
            priority,
            task_type,
        } => {
            guard(manager, RouteGuard::require(PermissionKey::TasksCreate))?;

            let draft = TaskDraft {
                title,
                description,
                status: None,
                assigned_to: assignee,
                due_date: due,
                priority,
                task_type,
            };
            match manager.guarded(api.create_task(&draft)).await? {
                Some(task) => println!("Created task {}", task.id),
                None => println!("Created task"),
            }
        }
        TaskCommand::Move { id, status } => {
            guard(manager, RouteGuard::require(PermissionKey::TasksUpdate))?;

            let task = manager.guarded(api.update_task_status(&id, status)).await?;
            let status = task.map_or(status, |task| task.status);
            println!("Moved {} to {}", id, status);
        }
        TaskCommand::Delete { id } => {
            guard(manager, RouteGuard::require(PermissionKey::TasksDelete))?;

            manager.guarded(api.delete_task(&id)).await?;
            println!("Deleted task {}", id);
        }
    }
    Ok(())
}

/// Restore the persisted session and refresh it against the backend
async fn resume(manager: &SessionManager) -> Result<Arc<taskboard_authz::Session>> {
    if manager.restore()?.is_none() {
        bail!("Not signed in. Run `taskboard login` first.");
    }
    let session = manager.refresh().await.context("failed to refresh session")?;
    debug!("Session resumed with {} permissions", session.permission_count());
    Ok(session)
}

fn guard(manager: &SessionManager, guard: RouteGuard) -> Result<()> {
    match guard.check(manager.engine().as_ref()) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::Redirect(path) => {
            debug!("Route guard redirect to {}", path);
            bail!("Access denied")
        }
    }
}

fn print_board<A: AccessControl>(access: &A, board: &KanbanBoard) {
    for column in board.columns() {
        println!("== {} ({}) ==", column.title, column.len());
        for task in &column.tasks {
            let assignee = task
                .assigned_user
                .as_ref()
                .map(|user| user.name.as_str())
                .unwrap_or("unassigned");
            println!("  [{}] {} ({})", task.id, task.title, assignee);
        }
    }

    let actions = [
        ("create", PermissionKey::TasksCreate),
        ("move", PermissionKey::TasksUpdate),
        ("delete", PermissionKey::TasksDelete),
    ];
    let hints: Vec<String> = actions
        .iter()
        .filter_map(|(label, key)| {
            match AccessGate::new(*key).mode(DenialMode::Disable).evaluate(access) {
                GateOutcome::Render => Some(label.to_string()),
                GateOutcome::Disabled { notice } => Some(format!("{} ({})", label, notice)),
                GateOutcome::Hidden | GateOutcome::Fallback => None,
            }
        })
        .collect();
    println!("actions: {}", hints.join(", "));
}
