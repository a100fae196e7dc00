use buywise_core::domain::common::{
    BuywiseConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig,
    entities::app_errors::CoreError,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "buywise-api", version, about = "Product buy decision API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = DEFAULT_GEMINI_BASE_URL
    )]
    pub gemini_base_url: String,

    #[arg(
        long = "llm-structured-output",
        env = "LLM_STRUCTURED_OUTPUT",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub structured_output: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(
        long = "log-json",
        env = "LOG_JSON",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub json: bool,
}

impl TryFrom<Args> for BuywiseConfig {
    type Error = CoreError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(BuywiseConfig {
            llm: LLMConfig::new(
                args.llm.gemini_api_key,
                args.llm.gemini_model,
                args.llm.gemini_base_url,
                args.llm.structured_output,
            )?,
        })
    }
}
