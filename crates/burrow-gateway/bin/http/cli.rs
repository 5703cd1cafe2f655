use burrow_core::shortcode::DEFAULT_LENGTH;
use burrow_gateway::cors::DEFAULT_ALLOWED_ORIGINS;
use burrow_shortener::DEFAULT_MAX_ATTEMPTS;
use burrow_telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};

pub const HOST_ENV: &str = "BURROW_HOST";
pub const PORT_ENV: &str = "PORT";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "BURROW_STORAGE_BACKEND";
pub const DB_PATH_ENV: &str = "DB_PATH";
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";
pub const CODE_LENGTH_ENV: &str = "BURROW_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "BURROW_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "sqlite://burrow.db?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow-gateway", about = "HTTP front end of the Burrow URL shortener")]
pub struct CLI {
    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Prefix for generated short URLs. Defaults to `http://localhost:<port>`.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DB_PATH_ENV, default_value = DEFAULT_DB_PATH)]
    pub db_path: String,

    /// Comma separated list of CORS origins, or `*`.
    #[arg(
        long,
        env = ALLOWED_ORIGINS_ENV,
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string())
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CLI {
        CLI::try_parse_from(std::iter::once("burrow-gateway").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn base_url_follows_port() {
        let cli = parse(&["--port", "9000", "--base-url", "https://sho.rt/"]);
        assert_eq!(cli.base_url(), "https://sho.rt");

        let cli = CLI {
            base_url: None,
            ..parse(&["--port", "9000"])
        };
        assert_eq!(cli.base_url(), "http://localhost:9000");
        assert_eq!(cli.listen_addr().port(), 9000);
    }

    #[test]
    fn origins_are_comma_separated() {
        let cli = parse(&["--allowed-origins", "https://a.example,https://b.example"]);
        assert_eq!(
            cli.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn explicit_backend_and_format() {
        let cli = parse(&["--storage", "in-memory", "--log-format", "json"]);
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result =
            CLI::try_parse_from(["burrow-gateway", "--storage", "postgres"]);
        assert!(result.is_err());
    }
}
