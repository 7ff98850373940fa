use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of movies returned by the top movies listing
    #[serde(default = "default_top_movies_limit")]
    pub top_movies_limit: usize,

    /// Email of the user whose taste every viewer is judged against
    #[serde(default = "default_reference_rater_email")]
    pub reference_rater_email: String,

    /// Optional JSON file used to populate the store at startup
    #[serde(default)]
    pub seed_file: Option<String>,

    /// Allow cross-origin requests
    #[serde(default)]
    pub enable_cors: bool,
}

/// Size of the top movies listing when not configured
pub const DEFAULT_TOP_MOVIES: usize = 50;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_movies_limit() -> usize {
    DEFAULT_TOP_MOVIES
}

fn default_reference_rater_email() -> String {
    "the-eye@of-judgment.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            top_movies_limit: default_top_movies_limit(),
            reference_rater_email: default_reference_rater_email(),
            seed_file: None,
            enable_cors: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
