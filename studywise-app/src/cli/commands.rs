use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::config::Config;

use anyhow::{bail, Result};
use std::io::{stdin, Read};
use std::path::PathBuf;
use std::sync::Arc;

use studywise_core::{
    generate, get_cards, list_set_names, save_set, ChatModel, DocumentStore, MemoryStore,
};
use studywise_json::JsonStore;
use studywise_openai::OpenAiModel;

pub async fn run_cli(args: Cli) -> Result<()> {
    match &args.cmd {
        Command::Api(api) => {
            let store = open_store(&args.store, args.store_path.clone()).await?;
            let model = open_model()?;
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(store, model, addr).await
        }
        _ => {
            let store = open_store(&args.store, args.store_path.clone()).await?;
            match args.cmd.clone() {
                Command::Generate(cmd) => generate_cmd(store, cmd).await,
                Command::Sets(cmd) => sets_cmd(store, cmd).await,
                _ => unreachable!(),
            }
        }
    }
}

pub async fn open_store(
    store: &StoreKind,
    path: Option<PathBuf>,
) -> Result<Arc<dyn DocumentStore>> {
    match store {
        StoreKind::Json => {
            let s = match path {
                Some(p) => {
                    let backups = p.with_extension("backups");
                    JsonStore::open_with(p, backups, 10).await?
                }
                None => JsonStore::open_default().await?,
            };
            Ok(Arc::new(s))
        }
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

pub fn open_model() -> Result<Arc<dyn ChatModel>> {
    let cfg = Config::load()?;
    Ok(Arc::new(OpenAiModel::new(cfg.api_key, cfg.base_url, cfg.model)))
}

async fn generate_cmd(store: Arc<dyn DocumentStore>, cmd: GenerateCmd) -> Result<()> {
    let text = match &cmd.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("no source text given");
    }

    let model = open_model()?;
    let cards = generate(&*model, &text, cmd.count).await?;

    for (i, card) in cards.iter().enumerate() {
        println!("\n[{}/{}]", i + 1, cards.len());
        println!("Q: {}", card.front);
        println!("A: {}", card.back);
    }

    if let Some(name) = cmd.save {
        let Some(user) = cmd.user else {
            bail!("--save requires --user");
        };
        if name.trim().is_empty() {
            bail!("set name must not be empty");
        }
        save_set(&*store, &user, &name, &cards).await?;
        println!("\nsaved {} card(s) as \"{}\"", cards.len(), name);
    }
    Ok(())
}

async fn sets_cmd(store: Arc<dyn DocumentStore>, cmd: SetsCmd) -> Result<()> {
    match cmd {
        SetsCmd::List { user } => {
            for name in list_set_names(&*store, &user).await? {
                println!("{name}");
            }
        }
        SetsCmd::Show { name, json } => {
            let cards = get_cards(&*store, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                for card in cards {
                    println!("{}\t{}", card.front, card.back);
                }
            }
        }
    }
    Ok(())
}
