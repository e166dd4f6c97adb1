use memchat_memory::MemoryPolicy;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub chat_model: String,
    pub summarizer_model: String,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            chat_model: "gpt-4.1-mini".to_string(),
            // Can be the same model or a cheaper one.
            summarizer_model: "gpt-4.1-mini".to_string(),
            base_url: None,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MemoryConfig {
    pub k_verbatim: usize,
    pub b_buffer: usize,
    pub token_budget_ratio: f32,
    pub safety_user_turns: u64,
    pub enable_token_trigger: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        let policy = MemoryPolicy::default();
        Self {
            k_verbatim: policy.k_verbatim,
            b_buffer: policy.b_buffer,
            token_budget_ratio: policy.token_budget_ratio,
            safety_user_turns: policy.safety_user_turns,
            enable_token_trigger: false,
        }
    }
}

impl MemoryConfig {
    pub fn to_policy(&self) -> MemoryPolicy {
        MemoryPolicy {
            k_verbatim: self.k_verbatim,
            b_buffer: self.b_buffer,
            token_budget_ratio: self.token_budget_ratio,
            safety_user_turns: self.safety_user_turns,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub memory: MemoryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        // Load from memchat.toml or use defaults
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("memchat").required(false))
            .add_source(config::Environment::with_prefix("MEMCHAT").separator("__"));

        // Override with specific env vars
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("openai.api_key", key)?;
        }

        if let Ok(url) = env::var("OPENAI_BASE_URL") {
            builder = builder.set_override("openai.base_url", url)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
