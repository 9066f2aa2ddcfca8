//! Doorlot CLI
//!
//! The `doorlot` command registers people, draws door numbers for them, and
//! keeps a history of every draw in a local JSON store.
//!
//! ## Commands
//!
//! - `people`: add, remove or list participants
//! - `select`: edit the saved selection used by `draw`
//! - `draw`: assign distinct door numbers to selected participants
//! - `history`: show past draws (yours, or everyone's for admins)
//! - `export`: write a recorded draw as a text or JSON report
//! - `settings`: company name and author label used in reports
//! - `login` / `logout` / `whoami`: the local session
//! - `user`: account administration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use doorlot_core::{
    AccountRegistry, AssignmentRange, Clock, DoorlotConfig, DrawService, ExportDocument,
    ExportSettings, FsKvStore, HistoryEntry, HistoryRecorder, KvStore, Roster, Selection,
    SystemClock,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "doorlot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Randomly assign door numbers and keep a history of every draw", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Store file (default: DOORLOT_STORE or .doorlot/store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the participant list
    People {
        #[command(subcommand)]
        action: PeopleAction,
    },

    /// Edit the saved selection used when `draw` gets no ids
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },

    /// Assign door numbers to selected participants and record the draw
    Draw {
        /// Lowest door number (default: DOORLOT_MIN_SLOT or 1)
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i64>,

        /// Highest door number (default: DOORLOT_MAX_SLOT or 100)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,

        /// Participant id to include (repeatable, order is kept; default: saved selection)
        #[arg(short, long = "select", value_name = "ID")]
        select: Vec<String>,

        /// Include every participant
        #[arg(short, long, conflicts_with = "select")]
        all: bool,
    },

    /// Show recorded draws
    History {
        /// Show every user's draws (admin only)
        #[arg(long)]
        all: bool,

        /// Print raw JSON entries
        #[arg(long = "raw")]
        raw: bool,
    },

    /// Export one of your recorded draws
    Export {
        /// 1-based entry number from `doorlot history` (default: latest)
        #[arg(short, long)]
        entry: Option<usize>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change report settings
    Settings {
        /// Company name used as the report title
        #[arg(long)]
        company_name: Option<String>,

        /// Label shown as the report author
        #[arg(long)]
        username: Option<String>,
    },

    /// Start a local session
    Login {
        username: String,

        #[arg(short, long, env = "DOORLOT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the local session
    Logout,

    /// Show the current session
    Whoami,

    /// Account administration (admin only once an account exists)
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum PeopleAction {
    /// Register a person
    Add { name: String },
    /// Remove a person by id
    Remove { id: String },
    /// List registered people
    List,
}

#[derive(Subcommand)]
enum SelectAction {
    /// Select a person if unselected, unselect otherwise
    Toggle { id: String },
    /// Select everyone, or clear if everyone is already selected
    All,
    /// Clear the selection
    Clear,
    /// Show the selection
    Show,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Add {
        username: String,

        #[arg(short, long, env = "DOORLOT_PASSWORD", hide_env_values = true)]
        password: String,

        /// Grant admin screens
        #[arg(long)]
        admin: bool,
    },
    /// Replace an account's password
    Passwd {
        username: String,

        #[arg(short, long, env = "DOORLOT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Flip an account's admin flag
    ToggleAdmin { username: String },
    /// List accounts
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // A missing .env is normal.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    doorlot_core::init_tracing(cli.json, level);

    let mut config = DoorlotConfig::from_env().context("Invalid DOORLOT_* environment")?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    let store = open_store(&config.store_path)?;

    match cli.command {
        Commands::People { action } => match action {
            PeopleAction::Add { name } => cmd_people_add(&store, &name),
            PeopleAction::Remove { id } => cmd_people_remove(&store, &id),
            PeopleAction::List => cmd_people_list(&store),
        },
        Commands::Select { action } => cmd_select(&store, action),
        Commands::Draw {
            min,
            max,
            select,
            all,
        } => {
            let range = AssignmentRange::new(
                min.unwrap_or(config.default_range.min()),
                max.unwrap_or(config.default_range.max()),
            )?;
            cmd_draw(&store, range, &select, all, &mut rand::thread_rng(), &SystemClock)
        }
        Commands::History { all, raw } => cmd_history(&store, all, raw),
        Commands::Export {
            entry,
            format,
            output,
        } => cmd_export(&store, entry, format, output.as_deref(), &SystemClock),
        Commands::Settings {
            company_name,
            username,
        } => cmd_settings(&store, company_name, username),
        Commands::Login { username, password } => cmd_login(&store, &username, &password),
        Commands::Logout => cmd_logout(&store),
        Commands::Whoami => cmd_whoami(&store),
        Commands::User { action } => match action {
            UserAction::Add {
                username,
                password,
                admin,
            } => cmd_user_add(&store, &username, &password, admin),
            UserAction::Passwd { username, password } => {
                cmd_user_passwd(&store, &username, &password)
            }
            UserAction::ToggleAdmin { username } => cmd_user_toggle_admin(&store, &username),
            UserAction::List => cmd_user_list(&store),
        },
    }
}

fn open_store(path: &Path) -> Result<Arc<dyn KvStore>> {
    let store = FsKvStore::open(path)
        .with_context(|| format!("Failed to open store at {}", path.display()))?;
    info!(path = %path.display(), "store opened");
    Ok(Arc::new(store))
}

/// Route admin commands. Not a security check: the flags live in the same
/// store anyone can edit. With no accounts yet, everyone is routed through
/// so the first admin can be created.
fn require_admin(accounts: &AccountRegistry) -> Result<()> {
    if accounts.list()?.is_empty() {
        return Ok(());
    }
    if !accounts.session()?.is_admin {
        bail!("This command needs an admin session (run `doorlot login` as an admin)");
    }
    Ok(())
}

// ========== People ==========

fn cmd_people_add(store: &Arc<dyn KvStore>, name: &str) -> Result<()> {
    let person = Roster::new(store.clone())
        .add(name)
        .context("Failed to add person")?;
    println!("Added {} ({})", person.name, person.id);
    Ok(())
}

fn cmd_people_remove(store: &Arc<dyn KvStore>, id: &str) -> Result<()> {
    if Roster::new(store.clone()).remove(id)? {
        println!("Removed {}", id);
    } else {
        println!("No person with id {}", id);
    }
    Ok(())
}

fn cmd_people_list(store: &Arc<dyn KvStore>) -> Result<()> {
    let people = Roster::new(store.clone()).list()?;
    if people.is_empty() {
        println!("No people registered");
        return Ok(());
    }
    for person in people {
        println!("{}  {}", person.id, person.name);
    }
    Ok(())
}

// ========== Selection ==========

fn cmd_select(store: &Arc<dyn KvStore>, action: SelectAction) -> Result<()> {
    let roster = Roster::new(store.clone());
    let people = roster.list()?;
    let mut selection = roster.load_selection()?;

    match action {
        SelectAction::Toggle { id } => {
            if !people.iter().any(|p| p.id == id) {
                bail!("No person with id {}", id);
            }
            selection.toggle(&id);
        }
        SelectAction::All => selection.toggle_all(&people),
        SelectAction::Clear => selection = Selection::new(),
        SelectAction::Show => {}
    }
    roster.save_selection(&selection)?;

    if selection.is_empty() {
        println!("Nothing selected");
    }
    for person in people.iter().filter(|p| selection.contains(&p.id)) {
        println!("{}  {}", person.id, person.name);
    }
    Ok(())
}

// ========== Draw ==========

fn cmd_draw<R: rand::Rng + ?Sized>(
    store: &Arc<dyn KvStore>,
    range: AssignmentRange,
    select: &[String],
    all: bool,
    rng: &mut R,
    clock: &dyn Clock,
) -> Result<()> {
    let actor = AccountRegistry::new(store.clone()).session()?.actor().to_string();
    let service = DrawService::new(store.clone());

    let selection = if all {
        Selection::all(&service.roster().list()?)
    } else if select.is_empty() {
        service.roster().load_selection()?
    } else {
        let mut selection = Selection::new();
        for id in select {
            if !selection.contains(id) {
                selection.toggle(id);
            }
        }
        selection
    };
    if selection.is_empty() {
        bail!("Nothing selected: pass --select <ID>, --all, or use `doorlot select`");
    }

    let outcome = service.draw(&actor, &selection, range, rng, clock)?;

    println!("{:<24} Door", "Name");
    for result in &outcome.results {
        println!("{:<24} {}", result.name, result.slot);
    }

    match outcome.recorded {
        Ok(entry) => {
            println!("Recorded for {} at {}", entry.actor, entry.timestamp.to_rfc3339());
            Ok(())
        }
        Err(e) => Err(e).context("Draw completed but could not be saved to history"),
    }
}

// ========== History ==========

fn cmd_history(store: &Arc<dyn KvStore>, all: bool, raw: bool) -> Result<()> {
    let accounts = AccountRegistry::new(store.clone());
    let recorder = HistoryRecorder::new(store.clone());

    let entries = if all {
        require_admin(&accounts)?;
        recorder.global_log()?
    } else {
        recorder.actor_log(accounts.session()?.actor())?
    };

    if raw {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No draws recorded");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("#{} {} {}", i + 1, entry.timestamp.to_rfc3339(), entry.actor);
        for result in &entry.results {
            println!("  {}: Door {}", result.name, result.slot);
        }
    }
    Ok(())
}

// ========== Export ==========

fn pick_entry(entries: Vec<HistoryEntry>, number: Option<usize>) -> Result<HistoryEntry> {
    let total = entries.len();
    let index = match number {
        Some(0) => bail!("Entry numbers start at 1"),
        Some(n) => n - 1,
        None if total == 0 => bail!("No draws recorded yet"),
        None => total - 1,
    };
    entries
        .into_iter()
        .nth(index)
        .with_context(|| format!("No entry #{} ({} recorded)", index + 1, total))
}

fn cmd_export(
    store: &Arc<dyn KvStore>,
    entry: Option<usize>,
    format: ExportFormat,
    output: Option<&Path>,
    clock: &dyn Clock,
) -> Result<()> {
    let actor = AccountRegistry::new(store.clone()).session()?.actor().to_string();
    let entries = HistoryRecorder::new(store.clone()).actor_log(&actor)?;
    let chosen = pick_entry(entries, entry)?;

    let settings = ExportSettings::load(store.as_ref())?;
    let doc = ExportDocument::from_results(&settings, clock.now(), &chosen.results);
    let body = match format {
        ExportFormat::Text => doc.render_text(),
        ExportFormat::Json => doc.to_json()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} rows to {}", doc.rows.len(), path.display());
        }
        None => print!("{}", body),
    }
    Ok(())
}

// ========== Settings ==========

fn cmd_settings(
    store: &Arc<dyn KvStore>,
    company_name: Option<String>,
    username: Option<String>,
) -> Result<()> {
    let mut settings = ExportSettings::load(store.as_ref())?;
    if company_name.is_some() || username.is_some() {
        if company_name.is_some() {
            settings.company_name = company_name;
        }
        if username.is_some() {
            settings.username = username;
        }
        settings.save(store.as_ref())?;
    }
    println!(
        "Company name: {}",
        settings.company_name.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Report author: {}",
        settings.username.as_deref().unwrap_or("(not set)")
    );
    Ok(())
}

// ========== Session ==========

fn cmd_login(store: &Arc<dyn KvStore>, username: &str, password: &str) -> Result<()> {
    let session = AccountRegistry::new(store.clone()).login(username, password)?;
    println!(
        "Logged in as {}{}",
        session.actor(),
        if session.is_admin { " (admin)" } else { "" }
    );
    Ok(())
}

fn cmd_logout(store: &Arc<dyn KvStore>) -> Result<()> {
    AccountRegistry::new(store.clone()).logout()?;
    println!("Logged out");
    Ok(())
}

fn cmd_whoami(store: &Arc<dyn KvStore>) -> Result<()> {
    let session = AccountRegistry::new(store.clone()).session()?;
    if session.is_logged_in {
        println!(
            "{}{}",
            session.actor(),
            if session.is_admin { " (admin)" } else { "" }
        );
    } else {
        println!("Not logged in (draws are recorded as {})", session.actor());
    }
    Ok(())
}

// ========== Users ==========

fn cmd_user_add(store: &Arc<dyn KvStore>, username: &str, password: &str, admin: bool) -> Result<()> {
    let accounts = AccountRegistry::new(store.clone());
    require_admin(&accounts)?;

    let first = accounts.list()?.is_empty();
    let account = accounts.add_user(username, password, admin || first)?;
    if first && !admin {
        println!("First account is created as admin");
    }
    println!(
        "Created {}{}",
        account.username,
        if account.is_admin { " (admin)" } else { "" }
    );
    Ok(())
}

fn cmd_user_passwd(store: &Arc<dyn KvStore>, username: &str, password: &str) -> Result<()> {
    let accounts = AccountRegistry::new(store.clone());
    require_admin(&accounts)?;
    accounts.change_password(username, password)?;
    println!("Password changed for {}", username);
    Ok(())
}

fn cmd_user_toggle_admin(store: &Arc<dyn KvStore>, username: &str) -> Result<()> {
    let accounts = AccountRegistry::new(store.clone());
    require_admin(&accounts)?;
    let now_admin = accounts.toggle_admin(username)?;
    println!(
        "{} is now {}",
        username,
        if now_admin { "an admin" } else { "a regular user" }
    );
    Ok(())
}

fn cmd_user_list(store: &Arc<dyn KvStore>) -> Result<()> {
    let accounts = AccountRegistry::new(store.clone());
    require_admin(&accounts)?;
    let users = accounts.list()?;
    if users.is_empty() {
        println!("No accounts");
        return Ok(());
    }
    for user in users {
        println!(
            "{:<20} {}",
            user.username,
            if user.is_admin { "Admin" } else { "User" }
        );
    }
    Ok(())
}
