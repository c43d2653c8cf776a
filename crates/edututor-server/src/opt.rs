use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use edututor_utils::args::llm::LlmServices;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "edututor", about = "Quizzes, dashboards and an AI tutor for students")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
    /// Delete the sqlite database file so that the next start creates a fresh one
    ResetDb(ResetDb),
}

#[derive(Debug, Clone, Args)]
#[group(multiple = true, required = false)]
pub(crate) struct Db {
    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,

    #[arg(long, help = "Delete and recreate a sqlite database that cannot be opened")]
    pub(crate) reset_corrupt_db: bool,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Quiz {
    #[arg(
        long = "questions",
        env = "QUESTIONS_PATH",
        default_value = "data/questions.json",
        help = "Path or file url of the question catalog"
    )]
    pub(crate) questions: String,

    #[arg(long, default_value_t = 3, help = "Number of questions when a quiz request names none")]
    pub(crate) default_question_count: usize,

    #[arg(long, default_value_t = 20, help = "Upper bound for the number of questions of a quiz")]
    pub(crate) max_question_count: usize,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(long, env = "DATABASE_URL")]
    pub(crate) database_url: Url,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) quiz: Quiz,

    #[arg(long, value_delimiter = ',', help = "Origins allowed to call the api")]
    pub(crate) origins: Vec<String>,

    #[command(flatten)]
    pub(crate) llm_services: LlmServices,

    #[arg(long = "sentry-dsn", env = "SENTRY_DSN", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry")]
    pub(crate) env: String,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct ResetDb {
    #[arg(long, env = "DATABASE_URL")]
    pub(crate) database_url: Url,
}
