pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "visita",
    about = "Real-estate assistant CLI",
    long_about = "Query agents and listings, search visit availability, book \
                  appointments, and talk to the assistant from the terminal.",
    after_help = "Examples:\n  visita agents\n  visita availability agent1 \"tomorrow afternoon\"\n  visita book agent1 --start 2025-09-02T10:00:00 --end 2025-09-02T10:45:00 --title \"Visit prop1\"\n  visita chat \"I want to visit an apartment in Paris\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List agents, or show one agent's full profile")]
    Agents {
        #[arg(help = "Agent id (agent1..agent3); omit to list all")]
        agent_id: Option<String>,
    },
    #[command(about = "List property listings with optional filters")]
    Properties {
        #[arg(long, help = "Property kind (Apartment, House, Office, ...)")]
        kind: Option<String>,
        #[arg(long, help = "Maximum price in euros")]
        max_price: Option<f64>,
        #[arg(long, help = "Minimum number of bedrooms")]
        min_bedrooms: Option<u32>,
        #[arg(long, help = "Location substring, case-insensitive")]
        location: Option<String>,
    },
    #[command(about = "Search visit slots for an agent over a window")]
    Availability {
        agent_id: String,
        #[arg(
            default_value = "next 7 days",
            help = "e.g. today, tomorrow afternoon, next 3 days, 2025-09-02 morning"
        )]
        window: String,
    },
    #[command(about = "Book a visit appointment and emit its ICS artifact")]
    Book {
        agent_id: String,
        #[arg(long, help = "Start datetime, ISO-8601 (reference zone if no offset)")]
        start: String,
        #[arg(long, help = "End datetime, ISO-8601")]
        end: String,
        #[arg(long, help = "Appointment title (at least 3 characters)")]
        title: String,
        #[arg(long, help = "Attendee email")]
        attendee_email: Option<String>,
        #[arg(long, help = "Attendee display name")]
        attendee_name: Option<String>,
        #[arg(long, help = "Visit address")]
        location: Option<String>,
        #[arg(long, help = "Free-text description")]
        description: Option<String>,
        #[arg(long, help = "Book even if the slot overlaps existing occupancy")]
        allow_conflict: bool,
    },
    #[command(about = "Send one message to the assistant and print its reply")]
    Chat { message: String },
    #[command(about = "Show the effective configuration with secrets redacted")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Agents { agent_id } => commands::agents::run(agent_id.as_deref()),
        Command::Properties { kind, max_price, min_bedrooms, location } => {
            commands::properties::run(kind, max_price, min_bedrooms, location)
        }
        Command::Availability { agent_id, window } => {
            commands::availability::run(&agent_id, &window)
        }
        Command::Book {
            agent_id,
            start,
            end,
            title,
            attendee_email,
            attendee_name,
            location,
            description,
            allow_conflict,
        } => commands::book::run(commands::book::BookArgs {
            agent_id,
            start,
            end,
            title,
            attendee_email,
            attendee_name,
            location,
            description,
            allow_conflict,
        }),
        Command::Chat { message } => commands::chat::run(&message),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
