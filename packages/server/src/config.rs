use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use crate::kernel::world_bank::WORLD_BANK_API_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Scores are kept in memory when unset
    pub database_url: Option<String>,
    pub tavily_api_key: Option<String>,
    pub world_bank_api_url: String,
    pub search_results_per_facet: usize,
    pub research_query_delay: Duration,
    pub search_timeout: Duration,
    pub search_requests_per_second: Option<NonZeroU32>,
    pub evaluator_timeout: Duration,
    pub evaluator_max_tokens: u32,
    pub evaluator_temperature: f32,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub demo_seed: Option<u64>,
    pub scoring_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            tavily_api_key: None,
            world_bank_api_url: WORLD_BANK_API_URL.to_string(),
            search_results_per_facet: research::DEFAULT_RESULTS_PER_FACET,
            research_query_delay: research::DEFAULT_QUERY_DELAY,
            search_timeout: Duration::from_secs(15),
            search_requests_per_second: None,
            evaluator_timeout: Duration::from_secs(120),
            evaluator_max_tokens: crate::kernel::evaluators::DEFAULT_MAX_TOKENS,
            evaluator_temperature: crate::kernel::evaluators::DEFAULT_TEMPERATURE,
            openai_base_url: None,
            anthropic_base_url: None,
            demo_seed: None,
            scoring_concurrency: 1,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            port: parsed("PORT")?.unwrap_or(defaults.port),
            database_url: optional("DATABASE_URL"),
            tavily_api_key: optional("TAVILY_API_KEY"),
            world_bank_api_url: optional("WORLD_BANK_API_URL")
                .unwrap_or(defaults.world_bank_api_url),
            search_results_per_facet: parsed("SEARCH_RESULTS_PER_FACET")?
                .unwrap_or(defaults.search_results_per_facet),
            research_query_delay: parsed("RESEARCH_QUERY_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.research_query_delay),
            search_timeout: parsed("SEARCH_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.search_timeout),
            search_requests_per_second: parsed("SEARCH_REQUESTS_PER_SECOND")?,
            evaluator_timeout: parsed("EVALUATOR_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.evaluator_timeout),
            evaluator_max_tokens: parsed("EVALUATOR_MAX_TOKENS")?
                .unwrap_or(defaults.evaluator_max_tokens),
            evaluator_temperature: parsed("EVALUATOR_TEMPERATURE")?
                .unwrap_or(defaults.evaluator_temperature),
            openai_base_url: optional("OPENAI_BASE_URL"),
            anthropic_base_url: optional("ANTHROPIC_BASE_URL"),
            demo_seed: parsed("DEMO_SEED")?,
            scoring_concurrency: parsed::<usize>("SCORING_CONCURRENCY")?
                .unwrap_or(defaults.scoring_concurrency)
                .max(1),
        })
    }
}

/// Non-blank value of an environment variable.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("{key} must be a valid number"))
        })
        .transpose()
}
