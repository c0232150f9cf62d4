use super::*;

#[derive(Parser)]
#[command(name = "resale-dev-server")]
#[command(about = "Marketplace API stand-in for local development", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory (wishlists.json, optional listings.json)
    #[arg(long, default_value = "./resale-data")]
    data_dir: PathBuf,

    /// Accepted bearer token; repeat for several users
    #[arg(long = "dev-token", default_value = "dev")]
    dev_tokens: Vec<String>,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let listings = load_catalogue(&args.data_dir).context("load listings")?;
    let wishlists = load_wishlists_from_disk(&args.data_dir).context("load wishlists")?;

    let state = Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        token_hashes: args.dev_tokens.iter().map(|t| hash_token(t)).collect(),
        listings: Arc::new(listings),
        wishlists: Arc::new(RwLock::new(wishlists)),
    });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!("resale-dev-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let authed = Router::new()
        .route("/wishlists", get(list_wishlist).post(add_to_wishlist))
        .route("/wishlists/:listing_id", delete(remove_from_wishlist))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/listings", get(list_listings))
        .route("/listings/:listing_id", get(get_listing))
        .merge(authed)
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
