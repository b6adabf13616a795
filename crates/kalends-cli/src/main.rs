//! `kalends` CLI — a command-line shell over the kalends calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Render the current month's grid
//! kalends show
//!
//! # Render March 2024, filtered to the Work category
//! kalends show --month 2024-03 --category Work
//!
//! # Create a weekly standup; prints the new event's id
//! kalends add --title "Standup" --date 2024-03-01 --time 09:00 --recurrence weekly
//!
//! # Move an event to another date (keeps its time)
//! kalends move <ID> 2024-03-20
//!
//! # Delete with confirmation prompt (or --yes to skip it)
//! kalends rm <ID>
//! ```
//!
//! All state lives in a single JSON file, by default under the platform
//! data directory; `--file` overrides the location.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kalends_app::{CalendarState, EventDraft, EventStore, IdGenerator, JsonFileStore, UuidIds};
use kalends_engine::{CategoryFilter, Recurrence, YearMonth, DEFAULT_CATEGORY};

#[derive(Parser)]
#[command(
    name = "kalends",
    version,
    about = "Month calendar with recurring events",
    arg_required_else_help = true
)]
struct Cli {
    /// Event store path (defaults to the platform data directory)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a month grid with its events
    Show {
        /// Month to display as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Search text; also jumps to the first matching event's month
        #[arg(long)]
        search: Option<String>,
        /// Only show events in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a new event; prints its id
    Add {
        #[arg(long)]
        title: String,
        /// Anchor date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time slot as HH:MM
        #[arg(long, default_value = "12:00")]
        time: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        /// none, daily, weekly or monthly
        #[arg(long, default_value = "none")]
        recurrence: Recurrence,
    },
    /// Change fields of an existing event
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New anchor date as YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// New time slot as HH:MM
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// none, daily, weekly or monthly
        #[arg(long)]
        recurrence: Option<Recurrence>,
    },
    /// Delete an event
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Move an event to another date, keeping its time
    Move {
        id: String,
        /// Target date as YYYY-MM-DD
        date: String,
    },
    /// List stored events, optionally filtered
    List {
        /// Only events whose title or description contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only events in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Print the selectable category set
    Categories,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let path = cli.file.clone().unwrap_or_else(default_store_path);
    let store = JsonFileStore::new(path);
    let today = Local::now().date_naive();
    let mut state = CalendarState::open(store, UuidIds, today);

    match cli.command {
        Commands::Show {
            month,
            search,
            category,
        } => {
            if let Some(text) = search {
                state.set_filter_text(text);
            }
            if let Some(cat) = category {
                state.set_filter_category(CategoryFilter::Only(cat));
            }
            // An explicit --month wins over the search auto-jump.
            if let Some(raw) = month {
                state.show_month(parse_month(&raw)?);
            }
            print!("{}", render_month(&state));
        }
        Commands::Add {
            title,
            date,
            time,
            description,
            category,
            recurrence,
        } => {
            let draft = EventDraft {
                title,
                date: Some(parse_date(&date)?),
                time: Some(parse_time(&time)?),
                description,
                category,
                recurrence,
            };
            let id = state.create_event(draft)?;
            println!("{}", id);
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            description,
            category,
            recurrence,
        } => {
            let current = state
                .find_event(&id)
                .with_context(|| format!("no event with id {}", id))?;
            let mut draft = EventDraft::from_event(current);
            if let Some(t) = title {
                draft.title = t;
            }
            if let Some(d) = date {
                draft.date = Some(parse_date(&d)?);
            }
            if let Some(t) = time {
                draft.time = Some(parse_time(&t)?);
            }
            if let Some(d) = description {
                draft.description = d;
            }
            if let Some(c) = category {
                draft.category = c;
            }
            if let Some(r) = recurrence {
                draft.recurrence = r;
            }
            state.update_event(&id, draft)?;
            println!("updated {}", id);
        }
        Commands::Rm { id, yes } => {
            if state.find_event(&id).is_none() {
                bail!("no event with id {}", id);
            }
            if !yes && !confirm("Delete this event?")? {
                println!("kept {}", id);
                return Ok(());
            }
            state.delete_event(&id);
            println!("deleted {}", id);
        }
        Commands::Move { id, date } => {
            let target = parse_date(&date)?;
            state.move_event(&id, target)?;
            println!("moved {} to {}", id, target);
        }
        Commands::List { search, category } => {
            if let Some(text) = search {
                state.set_filter_text(text);
            }
            if let Some(cat) = category {
                state.set_filter_category(CategoryFilter::Only(cat));
            }
            let events = state.filtered_events();
            if events.is_empty() {
                println!("no events");
            } else {
                for ev in events {
                    println!(
                        "{}  {}  {}  {} [{}]{}",
                        ev.id,
                        ev.date,
                        ev.time.format("%H:%M"),
                        ev.title,
                        ev.category,
                        recurrence_suffix(ev.recurrence)
                    );
                }
            }
        }
        Commands::Categories => {
            for cat in state.categories() {
                println!("{}", cat);
            }
        }
    }

    Ok(())
}

/// Render the visible month: a Su..Sa grid where `*` marks days with
/// visible events and `!` marks search-highlighted days, followed by the
/// in-month event listing.
fn render_month<S: EventStore, I: IdGenerator>(state: &CalendarState<S, I>) -> String {
    let mut out = String::new();
    let title = state.visible_month().first_day().format("%B %Y").to_string();
    out.push_str(&format!("{:^28}\n", title));
    out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa\n");

    let cells = state.month_cells();
    for week in cells.chunks(7) {
        for cell in week {
            let marker = if cell.highlighted {
                '!'
            } else if !cell.events.is_empty() {
                '*'
            } else {
                ' '
            };
            out.push_str(&format!(" {:>2}{}", cell.date.day(), marker));
        }
        out.push('\n');
    }

    let mut any = false;
    for cell in cells.iter().filter(|c| c.in_month) {
        for ev in &cell.events {
            any = true;
            out.push_str(&format!(
                "{}  {}  {} [{}]{}\n",
                cell.date,
                ev.time.format("%H:%M"),
                ev.title,
                ev.category,
                recurrence_suffix(ev.recurrence)
            ));
        }
    }
    if !any {
        out.push_str("no events\n");
    }
    out
}

fn recurrence_suffix(recurrence: Recurrence) -> String {
    match recurrence {
        Recurrence::None => String::new(),
        other => format!(" ({})", other),
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("kalends").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("kalends-events.json"))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time '{}', expected HH:MM", raw))
}

fn parse_month(raw: &str) -> Result<YearMonth> {
    let (y, m) = raw
        .split_once('-')
        .with_context(|| format!("invalid month '{}', expected YYYY-MM", raw))?;
    let year: i32 = y
        .parse()
        .with_context(|| format!("invalid year in '{}'", raw))?;
    let month: u32 = m
        .parse()
        .with_context(|| format!("invalid month number in '{}'", raw))?;
    YearMonth::new(year, month).with_context(|| format!("month out of range: {}", raw))
}
