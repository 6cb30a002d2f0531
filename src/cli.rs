use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{lookup, predict, serve};

#[derive(Parser)]
#[command(name = "congestion")]
#[command(about = "Traffic congestion prediction service with CLI tools")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    ///
    /// Defaults to ./congestion.toml when present. Every setting can also be
    /// given through CONGESTION_* environment variables, e.g.
    /// CONGESTION_TRAFFIC_API_KEY.
    #[arg(short, long, global = true, env = "CONGESTION_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 127.0.0.1:8000, 0.0.0.0:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Score a single set of traffic features and print the prediction as JSON
    Predict {
        /// Traffic speed (km/h)
        #[arg(short, long, allow_negative_numbers = true)]
        speed: f64,
        /// Traffic density
        #[arg(short, long, allow_negative_numbers = true)]
        density: f64,
        /// Temperature (°C)
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,
    },
    /// Fetch real-time traffic data for a coordinate and print it as JSON
    Lookup {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Serve { bind_address } => {
                serve(config, bind_address.as_deref()).await?;
            }
            Commands::Predict { speed, density, temperature } => {
                predict(speed, density, temperature)?;
            }
            Commands::Lookup { lat, lon } => {
                lookup(config, lat, lon).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict_with_negative_temperature() {
        let cli = Cli::try_parse_from([
            "congestion", "predict", "--speed", "42", "--density", "0.7", "--temperature", "-3.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Predict { speed, density, temperature } => {
                assert_eq!(speed, 42.0);
                assert_eq!(density, 0.7);
                assert_eq!(temperature, -3.5);
            }
            _ => panic!("Expected predict command"),
        }
    }

    #[test]
    fn test_parse_lookup_with_global_config() {
        let cli = Cli::try_parse_from([
            "congestion", "lookup", "--lat", "51.51", "--lon", "-0.08", "--config", "dev.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("dev.toml"));
        assert!(matches!(cli.command, Commands::Lookup { lat, lon } if lat == 51.51 && lon == -0.08));
    }

    #[test]
    fn test_predict_requires_all_features() {
        assert!(Cli::try_parse_from(["congestion", "predict", "--speed", "42"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
