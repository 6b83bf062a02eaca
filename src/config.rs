use anyhow::{bail, Result};

/// Listen address used when neither `BIND_ADDR` nor `--bind=` is given.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8088";

/// Runtime configuration of the mock server binary.
///
/// Resolution order: defaults, then environment (`BIND_ADDR`), then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            let addr = addr.trim();
            if !addr.is_empty() {
                config.bind_addr = addr.to_string();
            }
        }
        config
    }

    /// Apply command-line flags (`args[0]` is the program name and is skipped).
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        for arg in args.iter().skip(1) {
            if let Some(addr) = arg.strip_prefix("--bind=") {
                let addr = addr.trim();
                if addr.is_empty() {
                    bail!("--bind requires a non-empty address");
                }
                self.bind_addr = addr.to_string();
            } else if is_help_flag(arg) {
                continue;
            } else {
                bail!("unrecognized argument: {arg}");
            }
        }
        Ok(self)
    }

    /// Environment first, then flags.
    pub fn load(args: &[String]) -> Result<Self> {
        Self::from_env().apply_args(args)
    }
}

fn is_help_flag(arg: &str) -> bool {
    arg == "--help" || arg == "-h"
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| is_help_flag(a))
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--bind=<host:port>]\n\n\
         Environment:\n  \
         BIND_ADDR             listen address (default {DEFAULT_BIND_ADDR})\n  \
         RUST_LOG              log filter (default info,tower_http=info)\n  \
         ENV_FILE              env file loaded before configuration\n  \
         CORS_ALLOWED_ORIGINS  comma list or *\n  \
         CORS_ALLOWED_METHODS  comma list or *\n  \
         CORS_ALLOWED_HEADERS  comma list or *\n  \
         CORS_ALLOW_CREDENTIALS  1|true|yes|on, only with all three lists set\n  \
         CORS_MAX_AGE          seconds"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_when_env_unset() {
        let _g = ENV_GUARD.lock().unwrap();
        std::env::remove_var("BIND_ADDR");
        assert_eq!(ServerConfig::from_env().bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn env_then_flag_precedence() {
        let _g = ENV_GUARD.lock().unwrap();
        std::env::set_var("BIND_ADDR", "0.0.0.0:9000");
        let from_env = ServerConfig::load(&args(&["mock-openai"])).unwrap();
        assert_eq!(from_env.bind_addr, "0.0.0.0:9000");

        let from_flag = ServerConfig::load(&args(&["mock-openai", "--bind=127.0.0.1:7000"])).unwrap();
        assert_eq!(from_flag.bind_addr, "127.0.0.1:7000");
        std::env::remove_var("BIND_ADDR");
    }

    #[test]
    fn blank_env_is_ignored() {
        let _g = ENV_GUARD.lock().unwrap();
        std::env::set_var("BIND_ADDR", "   ");
        assert_eq!(ServerConfig::from_env().bind_addr, DEFAULT_BIND_ADDR);
        std::env::remove_var("BIND_ADDR");
    }

    #[test]
    fn rejects_unknown_and_empty_flags() {
        let base = ServerConfig::default();
        assert!(base.clone().apply_args(&args(&["p", "--port=1"])).is_err());
        assert!(base.apply_args(&args(&["p", "--bind="])).is_err());
    }

    #[test]
    fn help_detection() {
        assert!(wants_help(&args(&["p", "-h"])));
        assert!(wants_help(&args(&["p", "--bind=x:1", "--help"])));
        assert!(!wants_help(&args(&["--help"])));
        assert!(usage("mock-openai").starts_with("Usage: mock-openai"));
        assert!(usage("mock-openai").contains("CORS_ALLOW_CREDENTIALS"));
    }
}
