//! Runtime settings read from `--wordnet-*` flags and environment variables.

use std::env;
use std::path::PathBuf;

use wordnet_db::LoadMode;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_WORDNET_PATH: &str = "open_english_wordnet_2024/oewn2024";
pub const DEFAULT_WORDNET_IMAGE_PATH: &str = "/app/wordnet";
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub wordnet_path: PathBuf,
    pub wordnet_mode: LoadMode,
    pub rate_limit_rps: u32,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Read the process arguments and environment.
    pub fn load() -> Self {
        Self::from_sources(env::args().skip(1), |name| env::var(name).ok())
    }

    /// Flags win over environment variables; unparsable or zero values fall
    /// back to the defaults.
    pub fn from_sources<A, V>(args: A, var: V) -> Self
    where
        A: IntoIterator<Item = String>,
        V: Fn(&str) -> Option<String>,
    {
        let flags = Flags::parse(args);

        let wordnet_path = flags
            .wordnet_dir
            .or_else(|| var("WORDNET_DIR").map(PathBuf::from))
            .unwrap_or_else(default_wordnet_path);
        let wordnet_mode = flags
            .wordnet_mode
            .or_else(|| var("WORDNET_LOAD_MODE").as_deref().and_then(parse_load_mode))
            .unwrap_or(LoadMode::Mmap);
        let positive = |name: &str, default: u32| {
            var(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        Config {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: var("PORT")
                .and_then(|p| p.trim().parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            wordnet_path,
            wordnet_mode,
            rate_limit_rps: positive("RATE_LIMIT_RPS", DEFAULT_RATE_LIMIT_RPS),
            rate_limit_burst: positive("RATE_LIMIT_BURST", DEFAULT_RATE_LIMIT_BURST),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Default)]
struct Flags {
    wordnet_dir: Option<PathBuf>,
    wordnet_mode: Option<LoadMode>,
}

impl Flags {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut flags = Flags::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--wordnet-dir" {
                flags.wordnet_dir = args.next().map(PathBuf::from).or(flags.wordnet_dir);
            } else if let Some(path) = arg.strip_prefix("--wordnet-dir=") {
                flags.wordnet_dir = Some(PathBuf::from(path));
            } else if let Some(mode) = arg.strip_prefix("--wordnet-mode=") {
                flags.wordnet_mode = parse_load_mode(mode);
            }
        }
        flags
    }
}

fn default_wordnet_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_WORDNET_PATH);
    if local.exists() {
        local
    } else {
        PathBuf::from(DEFAULT_WORDNET_IMAGE_PATH)
    }
}

pub fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(args: &[&str], vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_sources(args.iter().map(|a| a.to_string()), |name| {
            vars.get(name).cloned()
        })
    }

    #[test]
    fn defaults_apply_without_input() {
        let cfg = config(&[], &[]);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.wordnet_mode, LoadMode::Mmap);
        assert_eq!(cfg.rate_limit_rps, DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(cfg.rate_limit_burst, DEFAULT_RATE_LIMIT_BURST);
    }

    #[test]
    fn flags_override_environment() {
        let cfg = config(
            &["--wordnet-dir", "/from/flag", "--wordnet-mode=owned"],
            &[("WORDNET_DIR", "/from/env"), ("WORDNET_LOAD_MODE", "mmap")],
        );
        assert_eq!(cfg.wordnet_path, PathBuf::from("/from/flag"));
        assert_eq!(cfg.wordnet_mode, LoadMode::Owned);

        let cfg = config(&["--wordnet-dir=/inline"], &[("WORDNET_DIR", "/from/env")]);
        assert_eq!(cfg.wordnet_path, PathBuf::from("/inline"));

        let cfg = config(&[], &[("WORDNET_DIR", "/from/env"), ("WORDNET_LOAD_MODE", "OWNED")]);
        assert_eq!(cfg.wordnet_path, PathBuf::from("/from/env"));
        assert_eq!(cfg.wordnet_mode, LoadMode::Owned);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let cfg = config(
            &[],
            &[
                ("HOST", "127.0.0.1"),
                ("PORT", "not-a-port"),
                ("RATE_LIMIT_RPS", "0"),
                ("RATE_LIMIT_BURST", "-3"),
            ],
        );
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.rate_limit_rps, DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(cfg.rate_limit_burst, DEFAULT_RATE_LIMIT_BURST);

        let cfg = config(&[], &[("PORT", "9000"), ("RATE_LIMIT_RPS", "20")]);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.rate_limit_rps, 20);
    }

    #[test]
    fn unknown_load_mode_is_ignored() {
        assert_eq!(parse_load_mode("mmap"), Some(LoadMode::Mmap));
        assert_eq!(parse_load_mode("lazy"), None);
        let cfg = config(&["--wordnet-mode=lazy"], &[]);
        assert_eq!(cfg.wordnet_mode, LoadMode::Mmap);
    }
}
