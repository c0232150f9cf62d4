use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use resale::listings::{ListingQuery, SortOrder};
use resale::model::{ApiConfig, ListingId, Session};
use resale::remote::RemoteClient;
use resale::store::LocalStore;
use resale::wishlist::{SyncReport, Wishlist};

#[derive(Parser)]
#[command(name = "resale")]
#[command(about = "Second-hand marketplace client", long_about = None)]
struct Cli {
    /// Override the configured API base URL
    #[arg(long, global = true, env = "RESALE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a client directory (.resale)
    Init {
        /// Re-initialize if .resale already exists
        #[arg(long)]
        force: bool,
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Store a session token and merge the guest wishlist into the account
    Login {
        #[arg(long)]
        token: String,
    },

    /// Drop the stored session
    Logout,

    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommands,
    },

    /// Browse listings
    Listings {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// Match against title and description
        #[arg(long)]
        search: Option<String>,
        /// newest, oldest, price-asc or price-desc
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one listing
    Listing {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set the API base URL
    Set {
        #[arg(long)]
        api_url: String,
    },
}

#[derive(Subcommand)]
enum WishlistCommands {
    /// List wishlisted listing ids
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add the listing if absent, remove it if present
    Toggle { id: String },
    /// Remove a listing
    Remove { id: String },
    /// Remove every listing
    Clear,
}

fn main() {
    resale::logging::init("warn");
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force, path } => {
            let root = path.unwrap_or(std::env::current_dir().context("get current dir")?);
            LocalStore::init(&root, force)?;
            println!("Initialized resale client at {}", root.display());
        }

        Commands::Config { command } => {
            let store = discover_store()?;
            match command {
                ConfigCommands::Show { json } => {
                    let cfg = store.read_config()?;
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&cfg).context("serialize config json")?
                        );
                    } else {
                        println!("api_url: {}", cfg.api_base_url());
                        let state = store.read_state()?;
                        let session = if state.session_token.is_some() {
                            "logged in"
                        } else {
                            "guest"
                        };
                        println!("session: {}", session);
                    }
                }
                ConfigCommands::Set { api_url } => {
                    let mut cfg = store.read_config()?;
                    cfg.api = Some(ApiConfig { base_url: api_url });
                    store.write_config(&cfg)?;
                    println!("Configuration updated");
                }
            }
        }

        Commands::Login { token } => {
            let store = discover_store()?;
            let client = remote_client(&store, cli.api_url.as_deref())?;
            let mut wishlist = Wishlist::with_session(store.clone(), &client, store.session()?);
            wishlist.mount();
            let report = wishlist.set_session(Some(Session::new(token.clone())));
            store.set_session(&token).context("store session")?;
            println!("Logged in");
            if let Some(report) = report {
                print_sync_report(&report);
            }
        }

        Commands::Logout => {
            let store = discover_store()?;
            let client = remote_client(&store, cli.api_url.as_deref())?;
            let mut wishlist = Wishlist::with_session(store.clone(), &client, store.session()?);
            wishlist.set_session(None);
            store.clear_session().context("clear session")?;
            println!("Logged out");
        }

        Commands::Wishlist { command } => {
            let store = discover_store()?;
            let client = remote_client(&store, cli.api_url.as_deref())?;
            let mut wishlist = Wishlist::with_session(store.clone(), &client, store.session()?);
            // Finishes an interrupted login merge, if any; failures are logged by the merge.
            wishlist.mount();

            match command {
                WishlistCommands::List { json } => {
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(wishlist.entries())
                                .context("serialize wishlist json")?
                        );
                    } else if wishlist.is_empty() {
                        println!("Wishlist is empty");
                    } else {
                        for id in wishlist.entries() {
                            println!("{}", id);
                        }
                    }
                }
                WishlistCommands::Toggle { id } => {
                    let id = ListingId::from(id);
                    wishlist.toggle(&id);
                    if wishlist.is_wishlisted(&id) {
                        println!("Added {}", id);
                    } else {
                        println!("Removed {}", id);
                    }
                }
                WishlistCommands::Remove { id } => {
                    let id = ListingId::from(id);
                    wishlist.remove_wishlist(&id);
                    println!("Removed {}", id);
                }
                WishlistCommands::Clear => {
                    // A signed-in clear only empties memory, so remove entries one by one first.
                    if wishlist.session().is_some() {
                        for id in wishlist.entries().to_vec() {
                            wishlist.remove_wishlist(&id);
                        }
                    }
                    wishlist.clear_wishlist();
                    println!("Wishlist cleared");
                }
            }
        }

        Commands::Listings {
            category,
            condition,
            min_price,
            max_price,
            search,
            sort,
            json,
        } => {
            let store = discover_store()?;
            let client = remote_client(&store, cli.api_url.as_deref())?;
            let query = ListingQuery {
                category,
                condition,
                min_price,
                max_price,
                search_term: search,
                sort,
            };
            let listings = query.apply(client.list_listings(&query)?);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&listings).context("serialize listings json")?
                );
                return Ok(());
            }
            if listings.is_empty() {
                println!("No listings match");
                return Ok(());
            }

            let mut wishlist = Wishlist::with_session(store.clone(), &client, store.session()?);
            wishlist.mount();
            for l in &listings {
                let mark = if wishlist.is_wishlisted(&l.id) { "*" } else { " " };
                println!(
                    "{} {} {:>10.2} {:<12} {:<10} {}",
                    mark, l.id, l.price, l.category, l.condition, l.title
                );
            }
        }

        Commands::Listing { id, json } => {
            let store = discover_store()?;
            let client = remote_client(&store, cli.api_url.as_deref())?;
            let listing = client.get_listing(&ListingId::from(id))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&listing).context("serialize listing json")?
                );
                return Ok(());
            }

            let mut wishlist = Wishlist::with_session(store.clone(), &client, store.session()?);
            wishlist.mount();
            println!("id: {}", listing.id);
            println!("title: {}", listing.title);
            println!("price: {:.2}", listing.price);
            println!("category: {}", listing.category);
            println!("condition: {}", listing.condition);
            if let Some(location) = &listing.location {
                println!("location: {}", location);
            }
            if let Some(created_at) = &listing.created_at {
                println!("created_at: {}", created_at);
            }
            if !listing.description.is_empty() {
                println!("description: {}", listing.description);
            }
            for image in &listing.images {
                println!("image: {}", image);
            }
            println!(
                "wishlisted: {}",
                if wishlist.is_wishlisted(&listing.id) { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

fn remote_client(store: &LocalStore, api_url: Option<&str>) -> Result<RemoteClient> {
    let base_url = match api_url {
        Some(url) => url.to_string(),
        None => store.read_config()?.api_base_url().to_string(),
    };
    RemoteClient::new(base_url)
}

fn print_sync_report(report: &SyncReport) {
    if report.is_empty() {
        return;
    }
    println!("Synced {} wishlist item(s)", report.pushed.len());
    for id in &report.failed {
        println!("Could not sync {}", id);
    }
}
