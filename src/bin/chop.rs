//! Submission CLI for the chop client
//!
//! Usage: `chop <url> [expiry]` where expiry is one of the preset keys
//! "1", "6", "12" or "never" (default "1"), or an RFC 3339 timestamp for a
//! custom absolute expiry. Reads the backend endpoint from the environment,
//! runs one submission, prints the resulting notice, and after a success
//! counts the cooldown down so the disabled window is visible.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use tokio::time::interval;

use linkchop::backend::BackendClient;
use linkchop::config::ClientConfig;
use linkchop::expiry::ExpirySelection;
use linkchop::submit::{ChopForm, Notice};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("linkchop=debug")
        .init();

    let mut args = env::args().skip(1);
    let url = match args.next() {
        Some(url) => url,
        None => {
            eprintln!("Usage: chop <url> [1|6|12|never|<rfc3339 timestamp>]");
            return ExitCode::FAILURE;
        }
    };
    let expiry_key = args.next().unwrap_or_else(|| "1".to_string());

    // Preset keys first; anything else must be a custom absolute timestamp
    let expiry = match ExpirySelection::from_preset(&expiry_key) {
        Some(selection) => selection,
        None => match expiry_key.parse::<DateTime<Utc>>() {
            Ok(at) => ExpirySelection::Custom(at),
            Err(_) => {
                eprintln!(
                    "Unknown expiry {:?}; use 1, 6, 12, never or an RFC 3339 timestamp",
                    expiry_key
                );
                return ExitCode::FAILURE;
            }
        },
    };

    let config = ClientConfig::from_env();
    let mut form = ChopForm::new(BackendClient::new(&config));
    form.set_url(url);
    form.select_expiry(expiry);

    let notice = match form.submit().await {
        Some(notice) => notice,
        // Unreachable for a fresh form; the control starts enabled
        None => return ExitCode::FAILURE,
    };

    println!("{}", notice);

    match notice {
        Notice::Chopped { short_link } => {
            println!("  {}", short_link.short_url(&config.edge_base));

            // One tick per second; a fresh interval per run, nothing shared
            let mut timer = interval(Duration::from_secs(1));
            timer.tick().await; // first tick fires immediately
            while form.cooldown_remaining() > 0 {
                timer.tick().await;
                form.tick();
                println!("  cooldown: {}s", form.cooldown_remaining());
            }
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    }
}
