#[macro_use]
extern crate tracing;

use crate::config::ScenarioConfig;
use crate::park::attraction::{Maintenance, Restriction, Round, Status};
use crate::park::visitor::{JoinQueue, Purchase};
use crate::scenario::{Outcome, Record, Scenario};
use colored::Colorize;
use failure::Error;
use std::env;
use std::fs::File;
use std::process;
use tracing_subscriber::EnvFilter;

mod config;
mod park;
mod scenario;

fn get_config(path: &str) -> Result<ScenarioConfig, Error> {
    let file = File::open(path)?;

    let config = serde_json::from_reader(file)?;

    Ok(config)
}

fn load_config(path: Option<String>) -> Result<ScenarioConfig, Error> {
    match path {
        Some(path) => get_config(&path),
        None => {
            let path = format!("{}/scenario.json", env!("CARGO_MANIFEST_DIR"));

            Ok(get_config(&path).unwrap_or_else(|err| {
                warn!(%path, %err, "using the built-in scenario");
                ScenarioConfig::default()
            }))
        }
    }
}

fn describe(record: &Record) -> String {
    match &record.outcome {
        Outcome::Sold {
            visitor,
            attraction,
            purchase,
        } => match purchase {
            Purchase::Paid { ticket, price } => format!(
                "{} bought ticket {} for {} ({})",
                visitor, ticket, attraction, price
            )
            .green()
            .to_string(),
            Purchase::Free { remaining, .. } => format!(
                "{} got free access to {} ({} free entries left)",
                visitor, attraction, remaining
            )
            .green()
            .to_string(),
            Purchase::InsufficientFunds { price, balance } => format!(
                "{} does not have enough money for {} (needs {}, has {})",
                visitor, attraction, price, balance
            )
            .yellow()
            .to_string(),
            Purchase::Restricted(rejection) => format!(
                "{} can't ride {} for {}",
                visitor, attraction, rejection
            )
            .yellow()
            .to_string(),
        },
        Outcome::Surrendered {
            visitor,
            attraction,
            ticket,
        } => match ticket {
            Some(ticket) => format!("{} handed over {} (paid {})", visitor, ticket, ticket.price())
                .green()
                .to_string(),
            None => format!("{} has no ticket for {}", visitor, attraction)
                .yellow()
                .to_string(),
        },
        Outcome::Queued {
            visitor,
            attraction,
            result,
        } => match result {
            JoinQueue::Joined { position } => format!(
                "{} is queueing for {} at position {}",
                visitor, attraction, position
            )
            .green()
            .to_string(),
            JoinQueue::Restricted(rejection) => format!(
                "{} can't ride {} for {}",
                visitor, attraction, rejection
            )
            .yellow()
            .to_string(),
            JoinQueue::NoTicket => format!(
                "{} has no ticket for {} and can't queue",
                visitor, attraction
            )
            .yellow()
            .to_string(),
            JoinQueue::QueueFull { capacity } => format!(
                "The queue for {} is full ({} visitors), {} has to come back later",
                attraction, capacity, visitor
            )
            .yellow()
            .to_string(),
        },
        Outcome::RoundStarted {
            attraction,
            round,
            riders,
            waiting,
        } => match round {
            Round::OutOfService => format!("{} is out of service", attraction)
                .red()
                .to_string(),
            Round::Dispatched { vip_share, .. } => format!(
                "Starting a round of {} with {} riders [{}], {} VIP, {} still waiting",
                attraction,
                riders.len(),
                riders.join(", "),
                vip_share,
                waiting
            )
            .cyan()
            .to_string(),
        },
        Outcome::Maintenance { attraction, result } => match result {
            Maintenance::Started => format!("{} is under maintenance", attraction).red().to_string(),
            Maintenance::Ended => format!("{} finished maintenance", attraction)
                .green()
                .to_string(),
            Maintenance::Unchanged(Status::UnderMaintenance) => {
                format!("{} already is under maintenance", attraction)
            }
            Maintenance::Unchanged(Status::Active) => format!("{} already is running", attraction),
        },
        Outcome::ActiveAttractions(names) => format!("Active attractions: {}", names.join(", ")),
        Outcome::Summary(summary) => {
            let mut lines = vec![format!("Sales of {}", summary.day).bold().to_string()];

            for (attraction, sales) in summary.attractions.iter() {
                lines.push(format!(
                    "  {}: {} in sales ({} paid tickets, {} free entries)",
                    attraction, sales.revenue, sales.paid_tickets, sales.free_entries
                ));
            }

            lines.push(format!("Total revenue of the day: {}", summary.total).bold().to_string());

            lines.join("\n")
        }
    }
}

fn run_local(config: ScenarioConfig) -> Result<(), Error> {
    let mut scenario = Scenario::bootstrap(config)?;

    println!("{}", format!("Welcome to {}", scenario.park.name()).bold());

    for attraction in scenario.park.attractions() {
        let restriction = match attraction.restriction() {
            Restriction::None => String::from("open to everybody"),
            Restriction::MaxAge(age) => format!("up to {} years", age),
            Restriction::MinHeight(height) => format!("from {} cm", height),
        };

        print!(
            "  {} - {} riders, {} min, {}, {}",
            attraction.name(),
            attraction.capacity(),
            attraction.config.duration,
            attraction.price(),
            restriction
        );

        if let Some(spec) = attraction.coaster_spec() {
            print!(
                ", {} km/h, {} m high, {} m of track",
                spec.max_speed, spec.max_height, spec.track_length
            );
        }

        println!();
    }

    for record in scenario.run()? {
        println!("{:>3}. {}", record.step, describe(&record));
    }

    for attraction in scenario.park.attractions() {
        debug!(
            attraction = attraction.name(),
            status = ?attraction.status(),
            rounds = attraction.rounds(),
            riders = attraction.riders_total(),
            waiting = attraction.queue_len(),
            vips_waiting = attraction.queue().filter(|visitor| visitor.vip).count(),
            revenue = scenario.park.sales(attraction.name()).revenue,
            "day finished"
        );
    }

    for visitor in scenario.visitors.iter() {
        let tickets: Vec<String> = visitor
            .tickets()
            .iter()
            .map(|ticket| format!("#{} {}", ticket.number(), ticket.attraction()))
            .collect();

        debug!(
            id = visitor.id(),
            visitor = visitor.name(),
            money = visitor.money(),
            tickets = ?tickets,
            "visitor left the park"
        );
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1);

    if let Err(err) = load_config(path).and_then(run_local) {
        error!(%err, "scenario failed");
        eprintln!("{}", err.to_string().red());
        process::exit(1);
    }
}
