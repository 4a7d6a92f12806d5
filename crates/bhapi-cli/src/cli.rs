//! CLI argument definitions for bhapi.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `player-id` | Resolve a player name to a Brawlhalla id |
//! | `stats` | Fetch lifetime player stats |
//! | `ranked` | Fetch the current ranked season |
//! | `glory` | Best rating, rating reset and glory |
//! | `clan` | Fetch a clan and its members |
//! | `legend` | Fetch one legend by id or name |
//! | `legends` | List every legend |
//! | `rankings` | Fetch a ranking page |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$BRAWLHALLA_API_KEY` | Brawlhalla API key |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Log scheduler activity to stderr |
//!
//! # Examples
//!
//! ```bash
//! bhapi player-id "Boomie"
//! bhapi glory 42 --pretty
//! bhapi rankings --kind 2v2 --region eu --page 2
//! ```

use clap::{Args, Parser, Subcommand};

/// bhapi - Brawlhalla statistics from the command line
#[derive(Debug, Parser)]
#[command(
    name = "bhapi",
    author,
    version,
    about = "Rate-limited Brawlhalla API client",
    long_about = "Queries the Brawlhalla public API through a bounded, rate-limited request \
queue and prints the results as JSON.\n\
\n\
Scheduler limits can be tuned with BHAPI_MAX_IN_FLIGHT, BHAPI_MAX_QUEUE_LENGTH, \
BHAPI_DISPATCH_TICK_MS, BHAPI_TIMEOUT_MS and BHAPI_RATE_LIMIT_PER_SECOND."
)]
pub struct Cli {
    /// API key; falls back to BRAWLHALLA_API_KEY.
    #[arg(long, global = true, env = "BRAWLHALLA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log scheduler activity to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a player name to a Brawlhalla id.
    ///
    /// # Examples
    ///
    ///   bhapi player-id Boomie
    PlayerId(NameArgs),

    /// Fetch lifetime stats for a player.
    ///
    /// # Examples
    ///
    ///   bhapi stats 42
    ///   bhapi stats --name Boomie
    Stats(PlayerArgs),

    /// Fetch the current ranked season for a player.
    Ranked(IdArgs),

    /// Best rating, season reset and glory for a player.
    Glory(IdArgs),

    /// Fetch a clan and its members.
    Clan(IdArgs),

    /// Fetch one legend by id or by name key.
    ///
    /// # Examples
    ///
    ///   bhapi legend 3
    ///   bhapi legend --name cassidy
    Legend(LegendArgs),

    /// List every legend.
    Legends,

    /// Fetch one page of a ranking ladder.
    ///
    /// # Examples
    ///
    ///   bhapi rankings
    ///   bhapi rankings --kind seasonal --region us-e --page 3
    Rankings(RankingsArgs),
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Exact in-game name.
    pub name: String,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Numeric id.
    pub id: u64,
}

#[derive(Debug, Args)]
pub struct PlayerArgs {
    /// Brawlhalla id.
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub id: Option<u64>,

    /// Look the player up by name instead of id.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct LegendArgs {
    /// Legend id.
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub id: Option<u32>,

    /// Legend name key, case-insensitive.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct RankingsArgs {
    /// Ladder: 1v1, 2v2 or seasonal.
    #[arg(long, default_value = "1v1")]
    pub kind: String,

    /// Region: all, us-e, eu, sea, brz, aus, us-w, jpn.
    #[arg(long, default_value = "all")]
    pub region: String,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bhapi").chain(args.iter().copied()))
    }

    #[test]
    fn stats_accepts_an_id_or_a_name() {
        let cli = parse(&["--api-key", "k", "stats", "42"]).expect("id form");
        assert!(matches!(
            cli.command,
            Command::Stats(PlayerArgs { id: Some(42), name: None })
        ));

        let cli = parse(&["--api-key", "k", "stats", "--name", "Boomie"]).expect("name form");
        assert!(matches!(cli.command, Command::Stats(PlayerArgs { id: None, name: Some(_) })));

        assert!(parse(&["--api-key", "k", "stats", "42", "--name", "Boomie"]).is_err());
    }

    #[test]
    fn rankings_defaults_to_first_global_1v1_page() {
        let cli = parse(&["--api-key", "k", "--pretty", "rankings"]).expect("defaults");

        assert!(cli.pretty);
        let Command::Rankings(args) = cli.command else {
            panic!("expected rankings");
        };
        assert_eq!(args.kind, "1v1");
        assert_eq!(args.region, "all");
        assert_eq!(args.page, 1);
    }
}
