mod cli;

use crate::cli::{CommandArg, OpenArgs, ShortenArgs, CLI};
use anyhow::{anyhow, bail};
use clap::Parser;
use jiff::Timestamp;
use linkshort_client::{ClientConfig, HttpLinkClient};
use linkshort_core::expiry::format_remaining;
use linkshort_core::{CreateLinkRequest, ShortCode};
use linkshort_cli::{forward_lines, render, SystemClipboard, TerminalNavigator, KEY_HELP};
use linkshort_redirect::{Command, RedirectSession, Status};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const COMMAND_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CLI::parse();

    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "starting linkshort"
    );

    let client = HttpLinkClient::new(
        ClientConfig::builder()
            .base_url(config.base_url.clone())
            .timeout(config.timeout())
            .build(),
    )?;

    match config.command {
        CommandArg::Open(args) => open(client, args).await,
        CommandArg::Shorten(args) => shorten(client, args).await,
    }
}

async fn open(client: HttpLinkClient, args: OpenArgs) -> anyhow::Result<()> {
    let code = ShortCode::from_route(&args.code)?;
    let policy = args.policy();
    info!(
        code = %code,
        countdown_seconds = policy.countdown_seconds,
        cancellable = policy.cancellable,
        "opening short link"
    );

    let navigator = TerminalNavigator::stdout(client.base_url().as_str());
    let (session, mut views) =
        RedirectSession::new(Arc::new(client), policy, navigator, SystemClipboard);

    let (commands, rx) = mpsc::channel(COMMAND_BUFFER);

    // stdin reads cannot be cancelled; the thread is left behind on exit
    let input = commands.clone();
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), &input));

    let interrupt = commands.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupted");
            let _ = interrupt.send(Command::Teardown).await;
        }
    });

    let printer = tokio::spawn(async move {
        let mut last = String::new();
        loop {
            let line = render(&views.borrow_and_update());
            if line != last {
                eprintln!("{line}");
                last = line;
            }
            if views.changed().await.is_err() {
                break;
            }
        }
    });

    eprintln!("{KEY_HELP}");
    let view = session.run(code, rx).await;

    interrupt.abort();
    drop(commands);
    if let Err(err) = printer.await {
        debug!(error = %err, "view printer stopped abnormally");
    }

    match view.state.status() {
        Status::Error => bail!("{}", view.state.message()),
        _ => Ok(()),
    }
}

async fn shorten(client: HttpLinkClient, args: ShortenArgs) -> anyhow::Result<()> {
    let now = Timestamp::now();
    let request = CreateLinkRequest {
        url: args.url.to_string(),
        expires_at: args.expiry.expires_at(now),
    };
    info!(url = %request.url, expiry = %args.expiry, "shortening link");

    let created = client
        .shorten(&request)
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    println!("{}", created.short_url);
    match created.expires_at {
        Some(expires_at) => eprintln!(
            "expiry: {} (expires in {})",
            args.expiry.label(),
            format_remaining(expires_at, now)
        ),
        None => eprintln!("expiry: {}", args.expiry.label()),
    }
    Ok(())
}
