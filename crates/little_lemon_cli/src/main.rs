//! Little Lemon CLI probe.
//!
//! # Usage
//!
//! ```bash
//! little-lemon ping
//! little-lemon menu --category mains --search pasta
//! little-lemon profile set --first-name Ann --toggle newsletter
//! little-lemon profile show
//! little-lemon profile logout
//! ```
//!
//! The profile database defaults to `<temp>/little_lemon.sqlite3` and can be
//! moved with `--db` or `LITTLE_LEMON_DB_PATH`.

use clap::{Args, Parser, Subcommand};
use little_lemon_core::db::open_db;
use little_lemon_core::{
    default_log_level, filter_menu, init_logging, Catalog, Category, MenuQuery, NotificationKind,
    PersonaProfile, ProfileEdit, ProfileField, ProfileSession, ProfileStore,
    SqliteKeyValueRepository,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "little_lemon.sqlite3";

#[derive(Parser)]
#[command(name = "little-lemon")]
#[command(version, about = "Little Lemon core probe")]
struct Cli {
    /// Profile database file
    #[arg(long, global = true, env = "LITTLE_LEMON_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (`trace|debug|info|warn|error`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check core linkage
    Ping,
    /// List menu items of one category
    Menu {
        /// Category label
        #[arg(short, long, default_value = "Starters", value_parser = parse_category)]
        category: Category,

        /// Case-insensitive text matched against name and description
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Inspect or edit the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,
    /// Edit fields and save
    Set(ProfileSetArgs),
    /// Clear the profile and delete the stored copy
    Logout,
}

#[derive(Args)]
struct ProfileSetArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Notification flag to flip; repeatable
    #[arg(long, value_parser = parse_notification)]
    toggle: Vec<NotificationKind>,
}

impl ProfileSetArgs {
    fn into_edits(self) -> Vec<ProfileEdit> {
        let texts = [
            (ProfileField::FirstName, self.first_name),
            (ProfileField::LastName, self.last_name),
            (ProfileField::Email, self.email),
            (ProfileField::PhoneNumber, self.phone),
        ];
        texts
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| ProfileEdit::SetText(field, value)))
            .chain(self.toggle.into_iter().map(ProfileEdit::ToggleNotification))
            .collect()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let db_path = cli
        .db
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

    match run(cli.command, db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, db_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Ping => {
            println!("little_lemon_core ping={}", little_lemon_core::ping());
            println!("little_lemon_core version={}", little_lemon_core::core_version());
        }
        Command::Menu { category, search } => {
            let catalog = Catalog::little_lemon();
            let items = filter_menu(catalog.all(), &MenuQuery::new(category, search));
            if items.is_empty() {
                println!("No items found");
            }
            for item in items {
                let price = item.price().to_string();
                println!("{:<14} {:>7}  {}", item.name(), price, item.description());
            }
        }
        Command::Profile { action } => {
            info!("event=cli_profile module=cli status=start");
            let conn = open_db(&db_path)?;
            let mut session =
                ProfileSession::new(ProfileStore::new(SqliteKeyValueRepository::new(conn)));
            session.start()?;

            match action {
                ProfileAction::Show => print_profile(session.profile()),
                ProfileAction::Set(args) => {
                    {
                        let mut scope = session.editing()?;
                        for edit in args.into_edits() {
                            scope.apply(edit)?;
                        }
                    }
                    print_profile(session.profile());
                }
                ProfileAction::Logout => {
                    session.log_out()?;
                    println!("logged out");
                }
            }
        }
    }
    Ok(())
}

fn print_profile(profile: &PersonaProfile) {
    for field in ProfileField::ALL {
        println!("{:<16} {}", field.key(), profile.text(field));
    }
    for kind in NotificationKind::ALL {
        println!(
            "{:<16} {}",
            kind.key(),
            profile.notification_preferences.get(kind)
        );
    }
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_label(value).ok_or_else(|| {
        let labels = Category::ALL.map(Category::label).join("|");
        format!("unknown category `{value}`; expected {labels}")
    })
}

fn parse_notification(value: &str) -> Result<NotificationKind, String> {
    NotificationKind::from_key(value).ok_or_else(|| {
        let keys = NotificationKind::ALL.map(NotificationKind::key).join("|");
        format!("unknown notification `{value}`; expected {keys}")
    })
}
