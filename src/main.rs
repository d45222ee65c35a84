use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use eventboard::config::env_loader::load_config;
use eventboard::config::model::Config;
use eventboard::detail::{open_detail, DetailOutcome};
use eventboard::error::INVALID_CREDENTIALS_MESSAGE;
use eventboard::events::api::EventsAPI;
use eventboard::events::catalog::{EventCatalog, LoadState};
use eventboard::events::model::Event;
use eventboard::filter::{filter, TypeFilter};
use eventboard::routes::Route;
use eventboard::schedule::{time_range_label, ScheduleView};
use eventboard::session::{FileStorage, Session};
use eventboard::tracing::setup_tracing;
use std::process::ExitCode;
use itertools::Itertools;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "eventboard")]
#[command(about = "Browse the hackathon schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the events you can see, sorted by start time
    List {
        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long, default_value = "")]
        query: String,

        /// Event type slug, e.g. "all" or "workshop"
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,
    },
    /// Show the calendar grid, one column per day
    Schedule {
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,

        /// Only show this day (0-based), clamped to the last day
        #[arg(short, long)]
        day: Option<usize>,
    },
    /// Show one event with its related events
    Event { id: u64 },
    /// Log in to see private events
    Login { username: String, password: String },
    /// Forget the login
    Logout,
    /// Navigate to a path such as "/", "/events/12" or "/login"
    Open { path: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let loki = setup_tracing().await;
    let config = load_config();

    let code = match run(cli.command, &config).await {
        Ok(code) => code,
        Err(err) => {
            error!("{:?}", err);
            eprintln!("{}", err);

            ExitCode::FAILURE
        }
    };

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    code
}

async fn run(command: Commands, config: &Config) -> Result<ExitCode> {
    let mut session = Session::restore(FileStorage::new(&config.session_dir));

    match command {
        Commands::Login { username, password } => {
            if session.login(&username, &password) {
                println!("Logged in as {}", username);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", INVALID_CREDENTIALS_MESSAGE);
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Logout => {
            session.logout();
            println!("Logged out");
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { query, type_filter } => {
            warn_if_unknown_type(&type_filter);
            let catalog = load_catalog(config).await?;

            print_listing(&filter(&catalog, &session, &query, &type_filter));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schedule {
            query,
            type_filter,
            day,
        } => {
            warn_if_unknown_type(&type_filter);
            let catalog = load_catalog(config).await?;
            let view = ScheduleView::build(
                &catalog,
                &session,
                &query,
                &type_filter,
                config.pixels_per_hour,
                &Local,
            );

            print_schedule(&view, day);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Event { id } => show_event(config, id, &session).await,
        Commands::Open { path } => match Route::parse(&path) {
            Some(Route::Listing) => {
                let catalog = load_catalog(config).await?;

                print_listing(&filter(&catalog, &session, "", &TypeFilter::All));
                Ok(ExitCode::SUCCESS)
            }
            Some(Route::Event(id)) => show_event(config, id, &session).await,
            Some(Route::Login) => {
                print_login_hint(&session);
                Ok(ExitCode::SUCCESS)
            }
            None => Err(anyhow!("Unknown path '{}'", path)),
        },
    }
}

async fn load_catalog(config: &Config) -> Result<EventCatalog> {
    let api = EventsAPI::new(&config.events_url);
    let mut state = LoadState::Loading;

    if state.is_loading() {
        eprintln!("Loading events...");
        info!("Loading events from {}", api.url());
    }

    state = api
        .get_events()
        .await
        .map(EventCatalog::new)
        .map_err(|err| {
            error!("{}", err);
            err.user_message()
        })
        .into();

    match state {
        LoadState::Loaded(catalog) => Ok(catalog),
        LoadState::Failed(message) => Err(anyhow!(message)),
        LoadState::Loading => Err(anyhow!("Events are still loading")),
    }
}

fn warn_if_unknown_type(type_filter: &TypeFilter) {
    if type_filter.is_known() {
        return;
    }

    warn!("Unknown event type filter '{}'", type_filter.slug());
    eprintln!(
        "No known event type '{}'. Choose one of: {}",
        type_filter.slug(),
        TypeFilter::choices().iter().map(|choice| choice.slug()).join(", ")
    );
}

async fn show_event(config: &Config, id: u64, session: &Session<FileStorage>) -> Result<ExitCode> {
    let catalog = load_catalog(config).await?;

    match open_detail(&catalog, id, session) {
        DetailOutcome::Show(view) => {
            print_event(&view.event);

            if let Some(link) = view.link {
                println!("  Link: {}", link);
            }

            if !view.related.is_empty() {
                println!();
                println!("Related events:");
                view.related.iter().for_each(print_event);
            }

            Ok(ExitCode::SUCCESS)
        }
        DetailOutcome::RedirectToLogin => {
            println!("Please log in to view this event.");
            print_login_hint(session);
            Ok(ExitCode::FAILURE)
        }
        DetailOutcome::NotFound(err) => {
            info!("{}", err);
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_event(event: &Event) {
    println!(
        "#{} [{}] {} ({})",
        event.id, event.event_type, event.name, event.visibility
    );
    println!("  {}", time_range_label(event, &Local));

    if !event.speakers.is_empty() {
        println!("  Speakers: {}", event.speaker_names());
    }

    if !event.description.is_empty() {
        println!("  {}", event.description);
    }
}

fn print_listing(events: &[Event]) {
    if events.is_empty() {
        println!("No events match your search.");
        return;
    }

    events.iter().for_each(print_event);
}

fn print_schedule(view: &ScheduleView, day: Option<usize>) {
    if view.is_empty() {
        println!("No events match your search.");
        return;
    }

    println!("{}", view.date_range_label);

    let days = match day.and_then(|index| view.day(index)) {
        Some(day) => std::slice::from_ref(day),
        None => view.days.as_slice(),
    };

    for column in days {
        println!();
        println!("{}", column.header);

        for card in &column.cards {
            let name = if card.locked {
                "Private event (log in to view)"
            } else {
                card.event.name.as_str()
            };

            println!(
                "  {:>8.1}px +{:>6.1}px  {} {}  {}  {}  -> {}",
                card.layout.top,
                card.layout.height,
                card.color,
                card.border_color,
                card.time_label,
                name,
                card.link
            );
        }
    }
}

fn print_login_hint(session: &Session<FileStorage>) {
    if session.is_authenticated() {
        println!("Already logged in.");
    } else {
        println!("Log in with: eventboard login <username> <password> ({})", Route::Login);
    }
}
