use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct LlmServices {
    #[arg(long, env = "OPENAI_API_KEY", required = false)]
    pub openai_key: Option<String>,
    #[arg(long, env = "OPENAI_API_BASE", required = false, help = "Base url of an OpenAI compatible api")]
    pub openai_api_base: Option<String>,
    #[arg(long, env = "OPENAI_MODEL", required = false)]
    pub openai_default_model: Option<String>,
    #[arg(long, required = false, help = "Model used by the ask ai feature")]
    pub assistant_model: Option<String>,
    #[arg(long, required = false, help = "Model used to answer questions about uploaded documents")]
    pub document_model: Option<String>,
}
