//! Command-line configuration

use clap::Parser;
use http_cat_client::HttpCatClient;
use std::path::PathBuf;
use std::time::Duration;

/// Default limit for PUT bodies (16 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Caching proxy for http.cat status code images
#[derive(Debug, Parser)]
#[command(name = "cat-cache-proxy", version, about)]
pub struct Args {
    /// Address to listen on
    #[arg(short = 'H', long)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long)]
    pub port: u16,

    /// Cache directory, created if it does not exist
    #[arg(short, long)]
    pub cache: PathBuf,

    /// Base URL of the image service
    #[arg(long, default_value = HttpCatClient::DEFAULT_BASE_URL)]
    pub upstream: String,

    /// Timeout for upstream requests in seconds (no timeout when unset)
    #[arg(long)]
    pub upstream_timeout_secs: Option<u64>,

    /// Maximum accepted PUT body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Args {
    pub fn into_config(self) -> ProxyConfig {
        ProxyConfig {
            host: self.host,
            port: self.port,
            cache_dir: self.cache,
            upstream_url: self.upstream,
            upstream_timeout: self.upstream_timeout_secs.map(Duration::from_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Resolved configuration, built once at startup and handed to the server
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
    pub upstream_url: String,
    pub upstream_timeout: Option<Duration>,
    pub max_body_bytes: usize,
}

impl ProxyConfig {
    /// Configuration with defaults for everything except the required values
    pub fn new(host: impl Into<String>, port: u16, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            cache_dir: cache_dir.into(),
            upstream_url: HttpCatClient::DEFAULT_BASE_URL.to_string(),
            upstream_timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_required_options() {
        let args = Args::try_parse_from([
            "cat-cache-proxy",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--cache",
            "./cache",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert_eq!(config.upstream_url, "https://http.cat");
        assert_eq!(config.upstream_timeout, None);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_parse_short_options() {
        let args =
            Args::try_parse_from(["cat-cache-proxy", "-H", "0.0.0.0", "-p", "8080", "-c", "/tmp/c"])
                .unwrap();
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8080);
        assert_eq!(args.cache, PathBuf::from("/tmp/c"));
    }

    #[test]
    fn test_parse_optional_options() {
        let config = Args::try_parse_from([
            "cat-cache-proxy",
            "-H",
            "localhost",
            "-p",
            "3000",
            "-c",
            "cache",
            "--upstream",
            "http://localhost:9999",
            "--upstream-timeout-secs",
            "10",
            "--max-body-bytes",
            "1024",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.upstream_url, "http://localhost:9999");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_missing_required_option_is_usage_error() {
        for argv in [
            vec!["cat-cache-proxy", "--port", "3000", "--cache", "c"],
            vec!["cat-cache-proxy", "--host", "h", "--cache", "c"],
            vec!["cat-cache-proxy", "--host", "h", "--port", "3000"],
        ] {
            let err = Args::try_parse_from(argv).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Args::try_parse_from([
            "cat-cache-proxy",
            "--host",
            "h",
            "--port",
            "70000",
            "--cache",
            "c",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_proxy_config_new_defaults() {
        let config = ProxyConfig::new("127.0.0.1", 0, "/tmp/cache");
        assert_eq!(config.upstream_url, HttpCatClient::DEFAULT_BASE_URL);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
