use std::path::PathBuf;

use clap::{Parser, Subcommand};

use innkeep::{
    config::EngineConfig,
    content::{migrate, ContentEngine},
    core::types::{document_schema, MediaCheckReport},
    db::Database,
    media::{checker, ExistenceProbe, FsProbe, HttpProbe},
    security::keyring,
    store::{ContentStore, HttpContentStore},
};

/// Content sync companion for the site admin: inspect sync state, pull and
/// push the content document, audit media references.
#[derive(Parser, Debug)]
#[command(name = "innkeep")]
#[command(about = "Content synchronization engine for the guesthouse site")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load content and report connection state
    Status,
    /// Load the content document and print it as JSON
    Pull {
        /// Bust intermediate HTTP caches to force a fresh read
        #[arg(long)]
        bust: bool,
    },
    /// Replace the content document with the given JSON file and save now
    Push {
        /// Path to a JSON content document
        file: PathBuf,
    },
    /// Probe every media reference and print the report
    CheckMedia {
        /// Check against the local public directory instead of HTTP HEAD
        #[arg(long, value_name = "DIR")]
        public_dir: Option<PathBuf>,
    },
    /// Prune media references that no longer exist, then persist
    Cleanup {
        /// Check against the local public directory instead of HTTP HEAD
        #[arg(long, value_name = "DIR")]
        public_dir: Option<PathBuf>,
    },
    /// Print the JSON Schema of the content document
    Schema,
    /// Store the admin bearer token in the OS keyring
    SetToken { token: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    innkeep::init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&document_schema())?);
            Ok(())
        }
        Command::SetToken { token } => {
            keyring::set_admin_token(token.trim())?;
            println!("admin token stored");
            Ok(())
        }
        command => {
            let config = EngineConfig::from_env();
            let cache = Database::new(&config.data_dir).await?;
            let store = HttpContentStore::new(&config)?;
            let engine = ContentEngine::new(store, cache, config);
            run(command, engine).await
        }
    }
}

async fn run<S>(
    command: Command,
    engine: ContentEngine<S>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: ContentStore + Clone + 'static,
{
    match command {
        Command::Status => {
            engine.load().await;
            println!("{}", serde_json::to_string_pretty(&engine.status())?);
        }
        Command::Pull { bust } => {
            if bust {
                engine.refresh().await;
            } else {
                engine.load().await;
            }
            println!("{}", serde_json::to_string_pretty(&engine.content())?);
        }
        Command::Push { file } => {
            engine.load().await;
            let raw = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let doc = migrate(raw);
            engine.update(|content| *content = doc);
            let outcome = engine.save_now().await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::CheckMedia { public_dir } => {
            engine.load().await;
            let report = match public_dir {
                Some(dir) => check_media(&engine, &FsProbe::new(dir)).await,
                None => check_media(&engine, &HttpProbe::new(engine.config())?).await,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Cleanup { public_dir } => {
            engine.load().await;
            let report = match public_dir {
                Some(dir) => engine.run_media_cleanup(&FsProbe::new(dir)).await,
                None => {
                    engine
                        .run_media_cleanup(&HttpProbe::new(engine.config())?)
                        .await
                }
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Schema | Command::SetToken { .. } => unreachable!("handled before engine setup"),
    }

    engine.shutdown();
    Ok(())
}

async fn check_media<S, P>(engine: &ContentEngine<S>, probe: &P) -> MediaCheckReport
where
    S: ContentStore + Clone + 'static,
    P: ExistenceProbe,
{
    checker::check_content_media(&engine.content(), probe, &engine.config().uploads_prefix).await
}
