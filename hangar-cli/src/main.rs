#![deny(missing_docs)]
//! Hangar command-line interface.
//!
//! Browses and edits the ship catalog through the Hangar REST API.

mod client;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::{DEFAULT_SERVER_URL, HangarClient};
use hangar_core::{
    PageRequest, Ship, ShipDraft, ShipFilter, ShipId, ShipOrder, ShipQuery, ShipType, ShipUpdate,
    production_year,
};
use std::fmt::Write;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "hangar", version, about = "Hangar ship catalog CLI")]
struct Cli {
    /// Base URL of the Hangar server.
    #[arg(long, global = true, env = "HANGAR_API_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug, Default)]
struct FilterArgs {
    /// Name substring.
    #[arg(long)]
    name: Option<String>,
    /// Planet substring.
    #[arg(long)]
    planet: Option<String>,
    /// Ship type (transport, military, merchant).
    #[arg(long = "type")]
    ship_type: Option<ShipType>,
    /// Produced after this instant (epoch millis, RFC 3339 or YYYY-MM-DD).
    #[arg(long, value_parser = parse_timestamp)]
    after: Option<DateTime<Utc>>,
    /// Produced before this instant (epoch millis, RFC 3339 or YYYY-MM-DD).
    #[arg(long, value_parser = parse_timestamp)]
    before: Option<DateTime<Utc>>,
    /// Used status.
    #[arg(long, value_name = "BOOL")]
    used: Option<bool>,
    /// Minimum speed.
    #[arg(long)]
    min_speed: Option<f64>,
    /// Maximum speed.
    #[arg(long)]
    max_speed: Option<f64>,
    /// Minimum crew size.
    #[arg(long)]
    min_crew: Option<i32>,
    /// Maximum crew size.
    #[arg(long)]
    max_crew: Option<i32>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Maximum rating.
    #[arg(long)]
    max_rating: Option<f64>,
}

impl FilterArgs {
    fn to_filter(&self) -> ShipFilter {
        ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after,
            before: self.before,
            is_used: self.used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew,
            max_crew_size: self.max_crew,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
struct PageArgs {
    /// Sort key (id, speed, date, rating).
    #[arg(long)]
    order: Option<ShipOrder>,
    /// Zero-based page number.
    #[arg(long)]
    page: Option<u32>,
    /// Ships per page.
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Args, Clone, Debug)]
struct CreateArgs {
    /// Ship name.
    #[arg(long)]
    name: String,
    /// Home planet.
    #[arg(long)]
    planet: String,
    /// Ship type (transport, military, merchant).
    #[arg(long = "type")]
    ship_type: ShipType,
    /// Production date (epoch millis, RFC 3339 or YYYY-MM-DD).
    #[arg(long, value_parser = parse_timestamp)]
    prod_date: DateTime<Utc>,
    /// Mark the ship as used.
    #[arg(long)]
    used: bool,
    /// Cruising speed.
    #[arg(long)]
    speed: f64,
    /// Number of crew members.
    #[arg(long)]
    crew_size: i32,
}

impl CreateArgs {
    fn into_draft(self) -> ShipDraft {
        ShipDraft {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: Some(self.used),
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct UpdateArgs {
    /// Ship identifier.
    id: ShipId,
    /// New name.
    #[arg(long)]
    name: Option<String>,
    /// New home planet.
    #[arg(long)]
    planet: Option<String>,
    /// New ship type.
    #[arg(long = "type")]
    ship_type: Option<ShipType>,
    /// New production date.
    #[arg(long, value_parser = parse_timestamp)]
    prod_date: Option<DateTime<Utc>>,
    /// New used status.
    #[arg(long, value_name = "BOOL")]
    used: Option<bool>,
    /// New speed.
    #[arg(long)]
    speed: Option<f64>,
    /// New crew size.
    #[arg(long)]
    crew_size: Option<i32>,
}

impl UpdateArgs {
    fn to_update(&self) -> ShipUpdate {
        ShipUpdate {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List one page of ships matching the filter.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Count ships matching the filter.
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show a single ship.
    Get {
        /// Ship identifier.
        id: ShipId,
    },
    /// Register a new ship; the server derives its rating.
    Create(CreateArgs),
    /// Change selected fields of a ship.
    Update(UpdateArgs),
    /// Delete a ship.
    Delete {
        /// Ship identifier.
        id: ShipId,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let client = HangarClient::new(&cli.server_url)?;
    let output = execute(&client, cli.command, cli.format).await?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
fn main() {}

async fn execute(
    client: &HangarClient,
    command: Commands,
    format: OutputFormat,
) -> CliResult<String> {
    match command {
        Commands::List { filter, page } => {
            let query = ShipQuery {
                filter: filter.to_filter(),
                order: page.order,
                page: PageRequest {
                    page_number: page.page,
                    page_size: page.page_size,
                },
            };
            let ships = client.list(&query).await?;
            render_ships(&ships, format)
        }
        Commands::Count { filter } => {
            let count = client.count(&filter.to_filter()).await?;
            Ok(match format {
                OutputFormat::Text => format!("{count} ship(s) match."),
                OutputFormat::Json => count.to_string(),
            })
        }
        Commands::Get { id } => render_ship(&client.get(id).await?, format),
        Commands::Create(args) => render_ship(&client.create(&args.into_draft()).await?, format),
        Commands::Update(args) => {
            let ship = client.update(args.id, &args.to_update()).await?;
            render_ship(&ship, format)
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            Ok(match format {
                OutputFormat::Text => format!("Deleted ship {id}."),
                OutputFormat::Json => serde_json::json!({ "deleted": id }).to_string(),
            })
        }
    }
}

/// Parse epoch milliseconds, an RFC 3339 instant, or a UTC calendar date.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| format!("timestamp out of range: {raw}"));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("expected epoch millis, RFC 3339 or YYYY-MM-DD, got {raw}"))
}

fn render_ships(ships: &[Ship], format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(ships)?);
    }
    if ships.is_empty() {
        return Ok("No ships found.".to_string());
    }
    let mut output = String::new();
    writeln!(
        output,
        "{:>5}  {:<24} {:<12} {:<10} {:>4}  {:<4} {:>5} {:>5} {:>8}",
        "ID", "NAME", "PLANET", "TYPE", "YEAR", "USED", "SPEED", "CREW", "RATING"
    )?;
    for ship in ships {
        writeln!(
            output,
            "{:>5}  {:<24} {:<12} {:<10} {:>4}  {:<4} {:>5.2} {:>5} {:>8.2}",
            ship.id,
            ship.name,
            ship.planet,
            ship.ship_type,
            production_year(&ship.prod_date),
            yes_no(ship.is_used),
            ship.speed,
            ship.crew_size,
            ship.rating
        )?;
    }
    Ok(output.trim_end().to_string())
}

fn render_ship(ship: &Ship, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(ship)?);
    }
    let mut output = String::new();
    writeln!(output, "Ship {}: {}", ship.id, ship.name)?;
    writeln!(output, "  planet:   {}", ship.planet)?;
    writeln!(output, "  type:     {}", ship.ship_type)?;
    writeln!(
        output,
        "  produced: {}",
        ship.prod_date.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(output, "  used:     {}", yes_no(ship.is_used))?;
    writeln!(output, "  speed:    {}", ship.speed)?;
    writeln!(output, "  crew:     {}", ship.crew_size)?;
    write!(output, "  rating:   {}", ship.rating)?;
    Ok(output)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
