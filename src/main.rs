use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use codebook::api::{configure_app, AppState};
use codebook::banner;
use codebook::cli::{self, Cli, Command};
use codebook::config::AppConfig;
use codebook::errors::Result;
use codebook::languages::LanguageTable;

#[actix_web::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(e) = dotenv {
        log::debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();

    let outcome = match cli.command {
        None | Some(Command::Serve) => serve(cli.languages_file).await.map(|_| true),
        Some(command) => cli::execute(command, cli.languages_file.as_deref()).await,
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(languages_file: Option<PathBuf>) -> Result<()> {
    banner::print_banner();

    let mut config = AppConfig::from_env()?;
    if languages_file.is_some() {
        config.languages_file = languages_file;
    }
    let languages = LanguageTable::load(config.languages_file.as_deref())?;

    log::info!(
        "Judge0 at {} ({} languages, {} runs per {}s per client)",
        config.judge0.api_base,
        languages.iter().count(),
        config.rate_limit.max_requests,
        config.rate_limit.window.as_secs()
    );

    let bind = (config.host.clone(), config.port);
    let request_timeout = config.request_timeout;
    let state = AppState::new(config, languages)?;

    println!("✅ Server running at http://localhost:{}", bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_app(state.clone()))
    })
    .client_request_timeout(request_timeout)
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
