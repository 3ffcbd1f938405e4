use clap::{CommandFactory, Parser, Subcommand};
use mimalloc::MiMalloc;
use wayfarer_geo::coordinate::Coordinate;

use crate::{parsers::parse_coordinate, route::RouteArgs, simulate::SimulateArgs};

mod parsers;
mod route;
mod simulate;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Straight-line (haversine) distance between two `<lat>,<lon>` positions
    Distance {
        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,

        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
    },
    /// Fetch a route from the directions API
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Replay a scripted track and taps through a full session
    #[command(visible_alias = "sim")]
    Simulate {
        #[command(flatten)]
        args: SimulateArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Distance { from, to }) => {
            println!("{}", from.haversine_distance(&to).value())
        }
        Some(Commands::Route { args }) => route::run(args).await?,
        Some(Commands::Simulate { args }) => simulate::run(args).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
