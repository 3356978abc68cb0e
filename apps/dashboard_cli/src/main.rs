use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, view, ArtistGateway, GenreFilter, MutationReceipt, RestArtistStore, SortKey,
    ViewQuery,
};
use shared::domain::{ArtistDraft, ArtistId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard_cli", about = "Manage the hosted artists table")]
struct Args {
    /// TOML file with store_url / anon_key / table; env vars still override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filtered, sorted artist list.
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Exact genre label, or "all".
        #[arg(long)]
        genre: Option<String>,
        #[arg(long, default_value_t = SortKey::NameAsc)]
        sort: SortKey,
        #[arg(long)]
        json: bool,
    },
    /// Print the distinct genres in the collection.
    Genres,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        genre: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Replace name, genre and image of an existing artist.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        genre: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let store = RestArtistStore::new(&settings).context("store is not configured")?;
    tracing::info!(endpoint = %store.endpoint(), "using artists store");
    let gateway = ArtistGateway::new(Arc::new(store));

    match args.command {
        Command::List {
            search,
            genre,
            sort,
            json,
        } => {
            let artists = gateway.fetch_all().await?;
            let query = ViewQuery {
                search,
                genre: GenreFilter::from_option(genre),
                sort,
            };
            let visible = view::derive_view(&artists, &query);
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if let Some(empty) = view::empty_state(visible.len(), &query) {
                println!("{}", empty.title());
            } else {
                for artist in visible {
                    println!("{}\t{}\t{}", artist.id, artist.name, artist.genre);
                }
            }
        }
        Command::Genres => {
            let artists = gateway.fetch_all().await?;
            for genre in view::distinct_genres(&artists) {
                println!("{genre}");
            }
        }
        Command::Add { name, genre, image } => {
            let receipt = gateway
                .insert(&ArtistDraft::new(&name, &genre, &image))
                .await?;
            report(&receipt);
        }
        Command::Update {
            id,
            name,
            genre,
            image,
        } => {
            let receipt = gateway
                .update(&ArtistId::new(id), &ArtistDraft::new(&name, &genre, &image))
                .await?;
            report(&receipt);
        }
        Command::Delete { id } => {
            let receipt = gateway.delete(&ArtistId::new(id)).await?;
            report(&receipt);
        }
    }

    Ok(())
}

fn report(receipt: &MutationReceipt) {
    match &receipt.refreshed {
        Some(artists) => println!(
            "{} ok; {}",
            receipt.operation,
            view::artist_count_label(artists.len())
        ),
        None => println!("{} ok; refresh failed (see log)", receipt.operation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_name_ascending() {
        let args = Args::try_parse_from(["dashboard_cli", "list"]).expect("parse");
        match args.command {
            Command::List {
                search, genre, sort, json,
            } => {
                assert_eq!(search, "");
                assert_eq!(genre, None);
                assert_eq!(sort, SortKey::NameAsc);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_sort_key_names() {
        let args = Args::try_parse_from(["dashboard_cli", "list", "--sort", "genre-desc"])
            .expect("parse");
        assert!(matches!(
            args.command,
            Command::List {
                sort: SortKey::GenreDesc,
                ..
            }
        ));
        assert!(Args::try_parse_from(["dashboard_cli", "list", "--sort", "newest"]).is_err());
    }

    #[test]
    fn update_requires_an_id() {
        assert!(
            Args::try_parse_from(["dashboard_cli", "update", "--name", "A", "--genre", "B"])
                .is_err()
        );
        let args = Args::try_parse_from([
            "dashboard_cli",
            "--config",
            "alt.toml",
            "delete",
            "--id",
            "42",
        ])
        .expect("parse");
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(args.command, Command::Delete { id } if id == "42"));
    }
}
