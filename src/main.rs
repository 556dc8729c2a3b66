use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use fr24_feed::sources::caching::FilesystemRequester;
use fr24_feed::sources::httpclient::HttpRequester;
use fr24_feed::sources::sources::Endpoints;
use fr24_feed::{logging, Client, Requester, Result};

#[derive(Parser)]
#[command(name = "fr24", version, about = "Query the Flightradar24 web service")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log decode details (dropped feed entries, requests)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Send every request to this host instead of the public ones
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Serve responses from files saved in this directory instead of the network
    #[arg(long, global = true)]
    offline: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Flights currently watched by the most users
    MostTracked,
    /// Airline names and codes
    Airlines,
    /// Summary of the live feed
    Feed,
    /// One flight picked at random from the live feed
    RandomFlight,
    /// Arrival and departure routes of an airport
    Routes {
        /// IATA code of the airport
        iata: String,
    },
    /// Save an airline logo as PNG
    Logo {
        /// ICAO code of the airline
        icao: String,
        /// IATA code; fetches from the CDN when given
        #[arg(long)]
        iata: Option<String>,
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct FeedSummary {
    full_count: i64,
    decoded: usize,
    version: i64,
}

fn main() {
    let Cli { command, verbose, base_url, offline } = Cli::parse();
    logging::init(verbose);

    let endpoints = base_url.as_deref()
        .map(Endpoints::with_base)
        .unwrap_or_default();

    let result = match offline {
        Some(dir) => run(Client::with_endpoints(FilesystemRequester::new_from_location(dir), endpoints), command),
        None => HttpRequester::new()
            .and_then(|requester| run(Client::with_endpoints(requester, endpoints), command)),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

fn run<R: Requester>(client: Client<R>, command: Command) -> Result<()> {
    match command {
        Command::MostTracked => print(&client.most_tracked()?),
        Command::Airlines => print(&client.airlines()?),
        Command::Feed => {
            let feed = client.feed()?;
            print(&FeedSummary { full_count: feed.full_count, decoded: feed.len(), version: feed.version })
        }
        Command::RandomFlight => {
            let (flight_id, flight) = client.random_flight(&mut rand::thread_rng())?;
            print(&flight)?;
            println!("{}", client.endpoints().flight_link(&flight.callsign, &flight_id));
            Ok(())
        }
        Command::Routes { iata } => print(&client.airport_routes(&iata)?),
        Command::Logo { icao, iata, out } => {
            let png = match iata {
                Some(iata) => client.airline_logo_cdn(&icao, &iata)?,
                None => client.airline_logo(&icao)?,
            };
            std::fs::write(&out, png)?;
            println!("{}", out.display());
            Ok(())
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
