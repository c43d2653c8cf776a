use crate::opt::{Commands, ResetDb, Run};
use anyhow::Result;
use axum::serve;
use clap::Parser;
use edututor_core::llm_config::LlmConfig;
use edututor_core::quiz::catalog::QuestionCatalog;
use edututor_core::quiz::store::SessionStore;
use edututor_utils::loader::loader;
use edututor_utils::net::create_listener;
use edututor_utils::tracing::TracingConfig;
use std::env;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

mod app;
mod db;
mod opt;
mod permissions;
mod routes;
mod user;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

/// How many questions a quiz may have.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QuizLimits {
    pub(crate) default_count: usize,
    pub(crate) max_count: usize,
}

#[derive(Debug)]
pub(crate) struct InnerAppConfig {
    catalog: QuestionCatalog,
    sessions: SessionStore,
    llm_config: LlmConfig,
    quiz_limits: QuizLimits,
}

#[derive(Clone, Debug)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    fn new(catalog: QuestionCatalog, llm_config: LlmConfig, quiz_limits: QuizLimits) -> Self {
        Self(Arc::new(InnerAppConfig {
            catalog,
            sessions: SessionStore::new(),
            llm_config,
            quiz_limits,
        }))
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.0.catalog
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.0.sessions
    }

    pub fn llm_config(&self) -> &LlmConfig {
        &self.0.llm_config
    }

    pub fn quiz_limits(&self) -> QuizLimits {
        self.0.quiz_limits
    }
}

async fn load_catalog(location: &str) -> QuestionCatalog {
    match loader(location) {
        Ok(loader) => QuestionCatalog::load(&loader).await,
        Err(error) => {
            tracing::warn!(
                error = &error as &dyn Error,
                location,
                "invalid question catalog location, continuing with an empty catalog"
            );
            QuestionCatalog::default()
        }
    }
}

async fn run(opt: Run) -> Result<()> {
    let _guard = edututor_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn)
            .env(opt.env)
            .build(),
    )?;

    let seaorm_pool = db::connect(&opt.db, &opt.database_url)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to open database"))?;

    let catalog = load_catalog(&opt.quiz.questions).await;
    let quiz_limits = QuizLimits {
        default_count: opt.quiz.default_question_count,
        max_count: opt.quiz.max_question_count,
    };
    let llm_config: LlmConfig = opt.llm_services.into();

    let app_config = AppConfig::new(catalog, llm_config, quiz_limits);
    let app = app::create_app(app_config, &opt.origins, seaorm_pool)?;

    let listener = create_listener((opt.host, opt.port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    let service = app.into_make_service();
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, service).await?;
    Ok(())
}

async fn reset_db(opt: ResetDb) -> Result<()> {
    let _guard = edututor_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .build(),
    )?;
    db::reset(&opt.database_url)?;
    Ok(())
}

fn main() -> Result<()> {
    unsafe { env::set_var("RUST_BACKTRACE", "1") };

    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
            Commands::ResetDb(o) => reset_db(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
