use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use km_api::{
    comments::Comment,
    details::{ListingDetails, OpeningHours},
    pipeline::{Effect, ListingEvent, ListingPipeline, ListingView, LoadState},
    sort::SortDirection,
    Client, Config, Listing, SessionManager, Status,
};
use tracing::warn;

mod logging;

const APP_DIR: &str = ".kebabmap";
const CONFIG_FILE: &str = "kebabmap.toml";
const SESSION_FILE: &str = "session.json";

#[derive(Parser, Debug)]
#[command(name = "kebabcli", about = "Browse the Kebab Map from the terminal")]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(short = 'c', long, global = true, help = "Config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the REST API")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "Base URL of the login scripts")]
    pub auth_url: Option<String>,

    #[arg(long, global = true, help = "Where the login session is kept")]
    pub session_file: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(about = "Log in and remember the session")]
    Login {
        #[command(flatten)]
        credentials: CredentialOpts,
    },

    #[clap(about = "Create an account and log into it")]
    Register {
        #[command(flatten)]
        credentials: CredentialOpts,
    },

    #[clap(about = "Forget the saved session")]
    Logout,

    #[clap(about = "Show who is logged in")]
    Whoami,

    #[clap(about = "List kebab places")]
    List {
        #[command(flatten)]
        filter: FilterOpts,

        #[arg(short = 'p', long, default_value_t = 1)]
        page: usize,

        #[arg(short = 'd', long, help = "Sort names Z to A")]
        desc: bool,

        #[arg(short = 'a', long, help = "Print every page")]
        all: bool,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    #[clap(about = "Show everything known about one place")]
    Details { id: String },

    #[clap(about = "Show comments on a place")]
    Comments { id: String },

    #[clap(about = "Comment on a place")]
    Comment { id: String, text: String },

    #[clap(about = "Add or remove a place from favorites")]
    Favorite { id: String },

    #[clap(about = "Send feedback about the app")]
    Feedback { text: String },
}

#[derive(Args, Debug, PartialEq)]
struct CredentialOpts {
    #[arg(short = 'e', long)]
    pub email: String,

    #[arg(short = 'p', long)]
    pub password: String,
}

#[derive(Args, Debug, PartialEq)]
struct FilterOpts {
    #[arg(short = 's', long, help = "open, closed, planned or unknown")]
    pub status: Option<Status>,

    #[arg(long, help = "Only craft (true) or only non-craft (false) places")]
    pub craft: Option<bool>,

    #[arg(long, help = "Only chain (true) or only independent (false) places")]
    pub chain: Option<bool>,
}

fn app_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(APP_DIR)
}

/// File, then environment, then flags.
async fn load_config(opts: &GlobalOpts) -> Result<Config> {
    let config = match &opts.config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("unable to load config from {}", path.display()))?,
        None => Config::load_or_default(app_dir().join(CONFIG_FILE)).await?,
    };
    let mut config = config.with_env_overrides();
    if let Some(api_url) = &opts.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(auth_url) = &opts.auth_url {
        config.auth_url = auth_url.clone();
    }
    if let Some(session_path) = &opts.session_file {
        config.session_path = Some(session_path.clone());
    }
    if let Some(log_level) = &opts.log_level {
        config.log_level = log_level.clone();
    }
    Ok(config)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_listings(listings: &[Listing]) {
    for listing in listings {
        let mut tags = vec![listing.status.to_string()];
        if listing.craft_rating {
            tags.push("craft".to_string());
        }
        if listing.in_chain {
            tags.push("chain".to_string());
        }
        println!(
            "{:>5}  {:<32} {:<40} [{}]",
            listing.id,
            listing.name,
            listing.address,
            tags.join(", ")
        );
    }
}

fn print_view(view: &ListingView) {
    println!(
        "Page {}/{} ({} places)",
        view.page,
        view.page_count.max(1),
        view.total
    );
    print_listings(&view.items);
}

fn print_hours(hours: &OpeningHours) {
    match hours.today() {
        Some(today) => println!("Open today: {} - {}", today.open, today.close),
        None => println!("Closed today"),
    }
    for (day, hours) in hours.days() {
        println!("  {:<10} {} - {}", day, hours.open, hours.close);
    }
}

fn print_details(details: &ListingDetails, hours: &OpeningHours, comments: &[Comment]) {
    println!("{} [{}]", details.title, details.status);
    println!("{}", details.location);
    println!("{}", details.description);
    println!("Google rating: {:.1}", details.rating);
    match details.year_closed {
        Some(closed) => println!("Open {}-{}", details.year_opened, closed),
        None => println!("Open since {}", details.year_opened),
    }
    if details.craft {
        println!("Craft kebab");
    }
    if details.is_favorite {
        println!("On your favorites list");
    }
    for (label, items) in [
        ("Meats", &details.meats),
        ("Sauces", &details.sauces),
        ("Order via", &details.order_methods),
    ] {
        if !items.is_empty() {
            println!("{}: {}", label, items.join(", "));
        }
    }
    if !hours.is_empty() {
        print_hours(hours);
    }
    println!();
    print_comments(comments);
}

fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        println!("No comments yet");
    }
    for comment in comments {
        println!("{}: {}", comment.user, comment.text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = load_config(&args.global_opts).await?;
    logging::init(&config.log_level);

    let client = Client::from_config(&config)?;
    let session_path = config
        .session_path
        .clone()
        .unwrap_or_else(|| app_dir().join(SESSION_FILE));
    let mut sessions = SessionManager::open(&session_path)
        .await
        .with_context(|| format!("unable to read session from {}", session_path.display()))?;

    match args.subcommand {
        Command::Login { credentials } => {
            let session = client
                .login(&credentials.email, &credentials.password)
                .await?;
            let session = sessions.login(session).await?;
            println!("Logged in as {}", session.username());
        }
        Command::Register { credentials } => {
            let session = client
                .register(&credentials.email, &credentials.password)
                .await?;
            let session = sessions.login(session).await?;
            println!("Registered and logged in as {}", session.username());
        }
        Command::Logout => {
            sessions.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match sessions.current() {
            Some(session) => println!("{} ({})", session.username(), session.email()),
            None => println!("Not logged in"),
        },
        Command::List {
            filter,
            page,
            desc,
            all,
            json,
        } => {
            let mut pipeline = ListingPipeline::new(config.paginator()?);
            pipeline.apply(ListingEvent::SetStatus(filter.status));
            pipeline.apply(ListingEvent::SetCraft(filter.craft));
            pipeline.apply(ListingEvent::SetChain(filter.chain));
            if desc {
                pipeline.apply(ListingEvent::SetSortDirection(SortDirection::Descending));
            }

            let fetcher = client.listing_fetcher()?;
            let progress = spinner("Loading kebab places...")?;
            let state = pipeline.reload(&fetcher).await.clone();
            progress.finish_and_clear();
            if let LoadState::Error(message) = state {
                anyhow::bail!(message);
            }

            pipeline.apply(ListingEvent::SetPage(if all { 1 } else { page }));
            let mut views = vec![pipeline.view()];
            while all && pipeline.apply(ListingEvent::NextPage) == Effect::Render {
                views.push(pipeline.view());
            }

            if json {
                let items: Vec<&Listing> = views.iter().flat_map(|view| &view.items).collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                views.iter().for_each(print_view);
            }
        }
        Command::Details { id } => {
            let progress = spinner("Loading details...")?;
            let favorite = async {
                match sessions.current() {
                    Some(session) => client.is_favorite(session, &id).await.map(Some),
                    None => Ok(None),
                }
            };
            let (details, comments, favorite) =
                futures::join!(client.get_details(&id), client.get_comments(&id), favorite);
            let mut details = details?;
            let comments = comments.unwrap_or_else(|error| {
                warn!(%error, "unable to load comments");
                Vec::new()
            });
            match favorite {
                Ok(Some(is_favorite)) => details.is_favorite = is_favorite,
                Ok(None) => {}
                Err(error) => warn!(%error, "unable to load favorite status"),
            }

            let mut hours = details.opening_hours.clone();
            if let Some(session) = sessions.current() {
                match client.get_opening_hours(session, &details.title).await {
                    Ok(Some(published)) => hours = published,
                    Ok(None) => {}
                    Err(error) => warn!(%error, "unable to load opening hours"),
                }
            }
            progress.finish_and_clear();
            print_details(&details, &hours, &comments);
        }
        Command::Comments { id } => {
            let comments = client.get_comments(&id).await?;
            print_comments(&comments);
        }
        Command::Comment { id, text } => {
            let session = sessions.require()?;
            client.add_comment(session, &id, &text).await?;
            println!("Comment added");
        }
        Command::Favorite { id } => {
            let session = sessions.require()?;
            let current = client.is_favorite(session, &id).await?;
            let now = client.toggle_favorite(session, &id, current).await?;
            if now {
                println!("Added {} to favorites", id);
            } else {
                println!("Removed {} from favorites", id);
            }
        }
        Command::Feedback { text } => {
            let session = sessions.require()?;
            let ack = client.send_feedback(session, &text).await?;
            println!("{}", ack);
        }
    }

    Ok(())
}
