use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use rosterscan::{
    csv, fetch,
    load::load_roster,
    render::render_table,
    search::search,
    store::RosterStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

const USAGE: &str = "usage: rosterscan [--url BASE_URL] [--file PATH | PATH]
Loads a roster CSV (over HTTP, falling back to the local file) and serves an
interactive search prompt. Commands at the prompt:
  <text>        filter records by normalized substring
  :json <text>  print matches as JSON lines
  :csv <text>   print matches as CSV
  (empty line)  show the first 200 records";

struct Args {
    url: Option<Url>,
    file: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut url = None;
    let mut file = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => {
                let raw = args.next().context("--url needs a value")?;
                url = Some(Url::parse(&raw).with_context(|| format!("parsing URL {}", raw))?);
            }
            "--file" => {
                file = Some(PathBuf::from(args.next().context("--file needs a value")?));
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if !other.starts_with('-') && file.is_none() => {
                file = Some(PathBuf::from(other));
            }
            other => bail!("unrecognized argument {:?}\n{}", other, USAGE),
        }
    }

    if url.is_none() && file.is_none() {
        bail!("need --url and/or a roster file\n{}", USAGE);
    }
    Ok(Args { url, file })
}

/// Auto-load over HTTP first; on failure fall back to the local file, the
/// way the page falls back to manual upload. Loads run to completion one at
/// a time, so the last completed load owns the store.
async fn acquire_text(client: &Client, args: &Args) -> Result<String> {
    if let Some(base) = &args.url {
        match fetch::fetch_roster_text(client, base).await {
            Ok(text) => return Ok(text),
            Err(err) => {
                error!(%err, "auto-load failed");
                if args.file.is_none() {
                    bail!("auto-load failed and no fallback file was given; pass --file PATH");
                }
            }
        }
    }
    let path = args.file.as_ref().expect("checked by parse_args");
    fetch::read_roster_file(path).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    let args = parse_args()?;
    let client = Client::new();

    let mut store = RosterStore::new();
    let text = acquire_text(&client, &args).await?;
    store.replace(load_roster(&text)?);

    let roster = store.roster().expect("just replaced");
    info!(students = roster.students.len(), "ready");

    let stdout = std::io::stdout();
    {
        let mut out = stdout.lock();
        render_table(&search(&roster.students, ""), &mut out)?;
        out.flush()?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("> ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let mut out = stdout.lock();

        if let Some(query) = line.strip_prefix(":json") {
            for s in search(&roster.students, query) {
                writeln!(out, "{}", serde_json::to_string(s)?)?;
            }
        } else if let Some(query) = line.strip_prefix(":csv") {
            let rows: Vec<Vec<String>> = search(&roster.students, query)
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        s.id.clone(),
                        s.grade.clone(),
                        s.section.clone(),
                        s.nationality.clone(),
                    ]
                })
                .collect();
            write!(out, "{}", csv::serialize(&rows, ','))?;
        } else {
            let hits = search(&roster.students, line);
            info!(results = hits.len(), "search");
            render_table(&hits, &mut out)?;
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    info!("done");
    Ok(())
}
