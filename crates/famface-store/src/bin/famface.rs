//! famface: command-line access to a persisted family photo collection.
//!
//! State lives under `FAMFACE_DATA_DIR` (default `.famface`) or wherever the
//! optional TOML config points. A fresh data directory starts with the demo
//! family.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use famface_core::defaults;
use famface_core::{
    describe_relationships, filter_people_by_name, format_date, gallery_stats, group_by_date,
    group_by_event, group_by_person, photos_of, recent_photos_of, sort_by_date_desc, AppState,
    Photo, RelationshipType,
};
use famface_store::{CreatePersonRequest, CreateRelationshipRequest, FamilyStore, StoreConfig};

#[derive(Parser)]
#[command(name = "famface")]
#[command(author, version, about = "Family photos and relationships")]
#[command(propagate_version = true)]
struct Cli {
    /// TOML config file with a [store] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupBy {
    #[value(name = "none")]
    Flat,
    Date,
    Event,
}

#[derive(Subcommand)]
enum Commands {
    /// List people
    People {
        /// Only names containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show one person with their relationships
    Person {
        /// Person id
        id: String,
    },

    /// List all relationships grouped by person
    Relationships,

    /// List photos
    Gallery {
        #[arg(short, long, value_enum, default_value = "none")]
        group_by: GroupBy,
    },

    /// Search photos with free text, e.g. "Anjali with her husband"
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Add a person
    AddPerson {
        name: String,

        /// Birthdate as YYYY-MM-DD
        #[arg(short, long)]
        birthdate: Option<NaiveDate>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Profile image URL
        #[arg(long)]
        profile_image: Option<String>,
    },

    /// Relate two people: <PERSON1> is <TYPE> of <PERSON2>
    Relate {
        person1: String,
        person2: String,
        /// parent, child, sibling, spouse, grandparent, grandchild,
        /// uncle/aunt, nephew/niece, cousin, in-law, other
        relationship_type: RelationshipType,
    },

    /// Delete a person, their relationships and their photo tags
    DeletePerson {
        id: String,
    },

    /// Replace everything with the demo family
    Reset,
}

fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| defaults::DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = StoreConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let mut store = FamilyStore::open_file(&config)
        .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
    let json = cli.json;

    match cli.command {
        Commands::People { filter } => cmd_people(store.state(), filter.as_deref(), json),
        Commands::Person { id } => cmd_person(store.state(), &id, json),
        Commands::Relationships => cmd_relationships(store.state(), json),
        Commands::Gallery { group_by } => cmd_gallery(store.state(), group_by, json),
        Commands::Search { query } => {
            let query = query.join(" ");
            let result = store.search(&query);
            if json {
                return print_json(&result);
            }
            println!("{} photo(s) for \"{}\"", result.photos.len(), result.query);
            for photo in &result.photos {
                print_photo(store.state(), photo);
            }
            Ok(())
        }
        Commands::AddPerson {
            name,
            birthdate,
            notes,
            profile_image,
        } => {
            let person = store.add_person(CreatePersonRequest {
                name,
                profile_image,
                birthdate,
                notes,
            })?;
            if json {
                return print_json(&person);
            }
            println!("Added {} ({})", person.name, person.id);
            Ok(())
        }
        Commands::Relate {
            person1,
            person2,
            relationship_type,
        } => {
            let pair = store.add_relationship(CreateRelationshipRequest {
                person1_id: person1,
                person2_id: person2,
                relationship_type,
            })?;
            if json {
                return print_json(&pair.into_edges());
            }
            let state = store.state();
            let name_of = |id: &str| state.person_name(id).unwrap_or(id).to_string();
            println!(
                "{} is now {}",
                name_of(pair.forward.person1_id.as_str()),
                pair.forward
                    .relationship_type
                    .label(&name_of(pair.forward.person2_id.as_str()))
            );
            Ok(())
        }
        Commands::DeletePerson { id } => {
            store.delete_person(&id)?;
            if json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted {}", id);
            Ok(())
        }
        Commands::Reset => {
            store.reset_to_seed();
            if json {
                return print_json(&gallery_stats(&store.state().photos));
            }
            println!("Restored the demo family");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_photo(state: &AppState, photo: &Photo) {
    let date = photo.date.map(format_date).unwrap_or_default();
    let people: Vec<&str> = photo
        .tagged_person_ids()
        .filter_map(|id| state.person_name(id))
        .collect();
    println!(
        "  {:<10} {:<18} {:<16} {}",
        photo.id,
        date,
        photo.event.as_deref().unwrap_or(""),
        people.join(", ")
    );
}

fn cmd_people(state: &AppState, filter: Option<&str>, json: bool) -> Result<()> {
    let people = filter_people_by_name(&state.people, filter.unwrap_or(""));
    if json {
        return print_json(&people);
    }
    for person in people {
        let birthdate = person.birthdate.map(format_date).unwrap_or_default();
        println!("{:<10} {:<16} {}", person.id, person.name, birthdate);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonDetails<'a> {
    person: &'a famface_core::Person,
    relationships: Vec<famface_core::RelationshipView<'a>>,
    photo_count: usize,
    recent_photos: Vec<&'a Photo>,
}

fn cmd_person(state: &AppState, id: &str, json: bool) -> Result<()> {
    let person = state
        .person(id)
        .ok_or_else(|| famface_core::Error::PersonNotFound(id.to_string()))?;
    let details = PersonDetails {
        person,
        relationships: describe_relationships(id, &state.people, &state.relationships),
        photo_count: photos_of(id, &state.photos).len(),
        recent_photos: recent_photos_of(id, &state.photos),
    };
    if json {
        return print_json(&details);
    }

    println!("{} ({})", person.name, person.id);
    if let Some(birthdate) = person.birthdate {
        println!("  Born {}", format_date(birthdate));
    }
    if let Some(notes) = &person.notes {
        println!("  {}", notes);
    }
    println!("  {} photo(s)", details.photo_count);
    for view in &details.relationships {
        println!(
            "  - {} ({}, {})",
            view.label,
            view.relationship.relationship_type.display_name(),
            view.relationship.id
        );
    }
    if !details.recent_photos.is_empty() {
        println!("  Recent photos:");
        for photo in &details.recent_photos {
            print_photo(state, photo);
        }
    }
    Ok(())
}

fn cmd_relationships(state: &AppState, json: bool) -> Result<()> {
    let groups = group_by_person(&state.people, &state.relationships);
    if json {
        return print_json(&groups);
    }
    for group in groups {
        println!("{}", group.person.name);
        for entry in group.entries {
            println!("  - {}", entry.label);
        }
    }
    Ok(())
}

fn cmd_gallery(state: &AppState, group_by: GroupBy, json: bool) -> Result<()> {
    match group_by {
        GroupBy::Flat => {
            let photos = sort_by_date_desc(&state.photos);
            if json {
                return print_json(&photos);
            }
            let stats = gallery_stats(photos.iter().copied());
            println!(
                "{} photos, {} people tagged, {} events",
                stats.photo_count, stats.people_tagged, stats.event_count
            );
            for photo in photos {
                print_photo(state, photo);
            }
        }
        GroupBy::Date => {
            let groups = group_by_date(&state.photos);
            if json {
                return print_json(&groups);
            }
            for group in groups {
                println!("{}", group.heading());
                for photo in group.photos {
                    print_photo(state, photo);
                }
            }
        }
        GroupBy::Event => {
            let groups = group_by_event(&state.photos);
            if json {
                return print_json(&groups);
            }
            for group in groups {
                println!("{}", group.event);
                for photo in group.photos {
                    print_photo(state, photo);
                }
            }
        }
    }
    Ok(())
}
