use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use bugtrack_client::config::{ClientConfig, API_URL_VAR};
use bugtrack_client::context::AppContext;
use bugtrack_client::error::{ClientError, ClientResult};
use bugtrack_client::filters::BugFilters;
use bugtrack_client::models::{Bug, BugDraft, Credentials, Environment, Registration};
use bugtrack_client::ui::bug_card::{render_card, render_detail};
use bugtrack_client::ui::bug_form::BugForm;
use bugtrack_client::ui::bug_list::{render_list, visible_bugs};
use bugtrack_client::ui::dashboard::render_dashboard;
use bugtrack_client::ui::projects::ProjectBoard;
use bugtrack_core::bug::{CLIENT_STATUSES, VALID_PRIORITIES};
use bugtrack_core::types::DbId;

#[derive(Parser)]
#[command(name = "bugtrack", version, about = "Report and track bugs from the terminal")]
struct Cli {
    /// Base URL of the API, including the `/api` prefix.
    #[arg(long, global = true, env = API_URL_VAR)]
    api_url: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Cards)]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Cards,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the server is up.
    Health,
    /// List bugs, optionally filtered.
    List {
        #[arg(long, value_parser = status_parser())]
        status: Option<String>,
        #[arg(long, value_parser = priority_parser())]
        priority: Option<String>,
        /// Case-insensitive text search over title and description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one bug in full.
    Show { id: DbId },
    /// Report a new bug.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        reporter: String,
        #[arg(long, default_value = "medium", value_parser = priority_parser())]
        priority: String,
        #[arg(long)]
        assignee: Option<String>,
        /// Repeat once per step.
        #[arg(long = "step")]
        steps: Vec<String>,
        #[arg(long)]
        os: Option<String>,
        #[arg(long)]
        browser: Option<String>,
        #[arg(long = "app-version")]
        app_version: Option<String>,
    },
    /// Edit a bug. Fields left out keep their current value.
    Update {
        id: DbId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = priority_parser())]
        priority: Option<String>,
        #[arg(long, value_parser = status_parser())]
        status: Option<String>,
        #[arg(long)]
        reporter: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Change only the status of a bug.
    Status {
        id: DbId,
        #[arg(value_parser = status_parser())]
        status: String,
    },
    /// Delete a bug.
    Delete {
        id: DbId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Statistics and recent activity.
    Dashboard,
    /// Sample project board.
    Projects,
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BUGTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BUGTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

fn status_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(CLIENT_STATUSES.iter().copied())
}

fn priority_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(VALID_PRIORITIES.iter().copied())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            for field in err.field_errors() {
                eprintln!("  {} {}", format!("{}:", field.field).yellow(), field.message);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "bugtrack_client=warn",
        1 => "bugtrack_client=debug",
        _ => "bugtrack_client=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    let tokens = AppContext::default_token_store(&config);
    let mut ctx = AppContext::new(&config, tokens)?;
    let format = cli.format;

    match cli.command {
        Command::Health => {
            let health = ctx.bug_service().health().await?;
            println!("{} {} ({})", "✓".green(), health.message, health.timestamp);
        }

        Command::List {
            status,
            priority,
            search,
        } => {
            let filters = BugFilters {
                status,
                priority,
                search,
            };
            ctx.bugs.set_filters(filters).await?;
            let visible = visible_bugs(ctx.bugs.bugs(), ctx.bugs.filters());
            match format {
                OutputFormat::Json => print_json(&visible)?,
                OutputFormat::Cards => print!(
                    "{}",
                    render_list(ctx.bugs.bugs(), ctx.bugs.filters(), ctx.bugs.is_loading())
                ),
            }
        }

        Command::Show { id } => {
            let bug = ctx.bug_service().get_bug(id).await?;
            match format {
                OutputFormat::Json => print_json(&bug)?,
                OutputFormat::Cards => print!("{}", render_detail(&bug)),
            }
        }

        Command::Create {
            title,
            description,
            project,
            reporter,
            priority,
            assignee,
            steps,
            os,
            browser,
            app_version,
        } => {
            let form = BugForm {
                title,
                description,
                project,
                priority,
            };
            form.validate().map_err(ClientError::InvalidForm)?;

            let environment = Environment {
                os,
                browser,
                version: app_version,
            };
            let draft = BugDraft {
                assignee,
                steps_to_reproduce: (!steps.is_empty()).then_some(steps),
                environment: (!environment.is_empty()).then_some(environment),
                ..form.into_draft(&reporter)
            };

            let bug = ctx.bugs.create_bug(&draft).await?;
            report_bug(format, "Bug reported successfully", &bug)?;
        }

        Command::Update {
            id,
            title,
            description,
            priority,
            status,
            reporter,
            assignee,
        } => {
            let current = ctx.bug_service().get_bug(id).await?;
            let mut draft = BugDraft::from(&current);
            draft.title = title.unwrap_or(draft.title);
            draft.description = description.unwrap_or(draft.description);
            draft.priority = priority.unwrap_or(draft.priority);
            draft.status = status.unwrap_or(draft.status);
            draft.reporter = reporter.unwrap_or(draft.reporter);
            if assignee.is_some() {
                draft.assignee = assignee;
            }

            let bug = ctx.bugs.update_bug(id, &draft).await?;
            report_bug(format, "Bug updated successfully", &bug)?;
        }

        Command::Status { id, status } => {
            ctx.bugs.fetch_bugs().await?;
            let bug = ctx.bugs.update_status(id, &status).await?;
            report_bug(format, "Bug updated successfully", &bug)?;
        }

        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete bug #{id}? This cannot be undone."))? {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }
            ctx.bugs.delete_bug(id).await?;
            println!("{} Bug deleted successfully", "✓".green());
        }

        Command::Dashboard => {
            // A stale or missing session only hides the assigned section.
            if let Err(err) = ctx.auth.hydrate().await {
                tracing::debug!(error = %err, "Continuing without a user");
            }
            ctx.bugs.fetch_bugs().await?;
            print!("{}", render_dashboard(ctx.bugs.bugs(), ctx.auth.user()));
        }

        Command::Projects => {
            print!("{}", ProjectBoard::with_mock_data().render());
        }

        Command::Login { email, password } => {
            ctx.auth.login(&Credentials { email, password }).await?;
            if let Some(user) = ctx.auth.user() {
                println!("{} Signed in as {}", "✓".green(), user.display_name().bold());
            }
        }

        Command::Register {
            name,
            email,
            password,
        } => {
            ctx.auth
                .register(&Registration {
                    name,
                    email,
                    password,
                })
                .await?;
            match ctx.auth.user() {
                Some(user) => println!(
                    "{} Registered and signed in as {}",
                    "✓".green(),
                    user.display_name().bold()
                ),
                None => println!("{} Registered. Run `bugtrack login` to sign in.", "✓".green()),
            }
        }

        Command::Logout => {
            ctx.auth.logout().await?;
            println!("{} Signed out", "✓".green());
        }

        Command::Whoami => {
            ctx.auth.hydrate().await?;
            match ctx.auth.user() {
                Some(user) => match format {
                    OutputFormat::Json => print_json(user)?,
                    OutputFormat::Cards => {
                        println!("{} <{}>", user.display_name().bold(), user.email)
                    }
                },
                None => println!("{}", "Not signed in.".dimmed()),
            }
        }
    }

    Ok(())
}

fn report_bug(
    format: OutputFormat,
    message: &str,
    bug: &Bug,
) -> ClientResult<()> {
    match format {
        OutputFormat::Json => print_json(bug),
        OutputFormat::Cards => {
            println!("{} {}", "✓".green(), message);
            print!("{}", render_card(bug));
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> ClientResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn confirm(prompt: &str) -> ClientResult<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
