use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use limenovel_pages::{ChapterOrder, ClientConfig, NovelClient, Session, page};

const USAGE: &str = "usage:
  limenovel-pages chapter \"id=<novel>&ch=<index>\" [--reader]
  limenovel-pages novel \"id=<novel>\" [--oldest]";

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };
    let Some(query) = args.get(1) else {
        bail!("{USAGE}");
    };

    let config = ClientConfig::from_env();
    let session_path = env::var("LIMENOVEL_SESSION")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Session::default_path());
    let session = Session::load(&session_path);
    let client = NovelClient::new(config, session)?;

    let html = match command.as_str() {
        "chapter" => {
            let open_reader = args.iter().any(|arg| arg == "--reader");
            page::chapter_page(&client, query, open_reader).await
        }
        "novel" => {
            let order = if args.iter().any(|arg| arg == "--oldest") {
                ChapterOrder::Oldest
            } else {
                ChapterOrder::Newest
            };
            page::novel_page(&client, query, order).await
        }
        other => bail!("unknown command `{other}`\n{USAGE}"),
    };

    println!("{html}");
    Ok(())
}
