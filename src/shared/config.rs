use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 1500;
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

#[derive(Clone, Debug)]
pub struct Config {
  pub api_base_url: String,
  /// How long the success notice stays up before the create dialog closes.
  pub close_delay: Duration,
  pub rows_per_page: usize,
  pub token_path: PathBuf,
}

impl Config {
  pub fn from_env() -> Self {
    let api_base_url = env::var("API_BASE_URL")
      .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let close_delay = Duration::from_millis(parse_var(
      "MEMBROS_CLOSE_DELAY_MS",
      DEFAULT_CLOSE_DELAY_MS,
    ));
    let rows_per_page =
      parse_var("MEMBROS_ROWS_PER_PAGE", DEFAULT_ROWS_PER_PAGE).max(1);
    let token_path = env::var("MEMBROS_TOKEN_PATH")
      .map(PathBuf::from)
      .unwrap_or_else(|_| default_token_path());
    Self {
      api_base_url,
      close_delay,
      rows_per_page,
      token_path,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_BASE_URL.to_string(),
      close_delay: Duration::from_millis(DEFAULT_CLOSE_DELAY_MS),
      rows_per_page: DEFAULT_ROWS_PER_PAGE,
      token_path: default_token_path(),
    }
  }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
  match env::var(key) {
    Ok(value) => value.trim().parse().unwrap_or_else(|_| {
      tracing::warn!(key, %value, "ignoring unparsable config value");
      default
    }),
    Err(_) => default,
  }
}

fn default_token_path() -> PathBuf {
  dirs::data_local_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join("membros-dashboard")
    .join("token.json")
}
