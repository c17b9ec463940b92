//! agentdir - Agent directory CLI

use std::future::Future;
use std::sync::Arc;

use agentdir::config;
use agentdir::submit::SubmitError;
use agentdir::{
    AuthState, Catalog, CatalogItem, Domain, FavoritesState, FilterCriteria, JsonProfileStore,
    JsonSubmissionStore, LocalAuth, Paths, Session, Settings, SignInProvider, SourceFacet,
    Submission, ToggleError, ToggleOutcome,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agentdir")]
#[command(about = "Agent directory - browse skills, MCP servers, tools and plugins")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the browsable domains
    Domains,

    /// List the categories of a domain
    Categories {
        /// skills, mcp-servers, tools or plugins
        domain: Domain,
    },

    /// Search a domain (default: configured default domain)
    List {
        domain: Option<Domain>,

        /// Case-insensitive text to look for in name, description and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category name, or "All"
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Plugin source: all, official or community
        #[arg(short, long)]
        source: Option<SourceFacet>,

        /// Only show favorites
        #[arg(long)]
        favorites: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show detailed info for an item
    Info {
        domain: Domain,

        /// Item ID (e.g. git-helper)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in with an email address
    Login {
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show who is signed in
    Whoami,

    /// Add an item to favorites, or remove it if it already is one
    Fav {
        domain: Domain,

        /// Item ID
        id: String,
    },

    /// List favorites (default: all domains)
    Favorites {
        domain: Option<Domain>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Propose a new catalog entry
    Submit {
        domain: Domain,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        category: String,

        /// Homepage or repository URL
        #[arg(long)]
        link: Option<String>,

        #[arg(long)]
        author: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Get or set configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show resolved paths
    Paths,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get config value(s)
    Get {
        /// Specific key (omit for all)
        key: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a config value (catalog, defaultDomain)
    Set {
        /// Config key
        key: String,

        /// Config value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let paths = Paths::resolve();
    let settings = match Settings::load(&paths) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: {}", e);
            Settings::default()
        }
    };

    match cli.command {
        Commands::Paths => {
            println!("Config file:   {}", paths.config_file().display());
            println!("Data dir:      {}", paths.data_dir().display());
            println!("Profiles dir:  {}", paths.profiles_dir().display());
            println!("Session file:  {}", paths.session_file().display());
            println!("Catalog:       {}", settings.catalog_location());
        }
        Commands::Domains => {
            let catalog = load_catalog(&settings);
            for domain in Domain::ALL {
                println!("{:<12} {} items", domain.key(), catalog.items(domain).len());
            }
        }
        Commands::Categories { domain } => {
            let catalog = load_catalog(&settings);
            for category in catalog.categories(domain) {
                let criteria = FilterCriteria::new().with_category(category);
                println!("{:<24} {}", category, catalog.search(domain, &criteria).len());
            }
        }
        Commands::List {
            domain,
            query,
            category,
            source,
            favorites,
            json,
        } => {
            let domain = domain.unwrap_or_else(|| settings.default_domain());
            let catalog = load_catalog(&settings);
            if !catalog.has_category(domain, &category) {
                eprintln!("Unknown category for {}: {}", domain, category);
                eprintln!("Available: {}", catalog.categories(domain).join(", "));
                std::process::exit(1);
            }
            let mut criteria = FilterCriteria::new().with_query(query).with_category(category);
            if let Some(source) = source {
                criteria = criteria.with_source(source);
            }

            let fav_state = block_on(current_favorites(&paths));
            let results: Vec<_> = fav_state
                .annotate(domain, catalog.search(domain, &criteria))
                .into_iter()
                .filter(|(_, fav)| !favorites || *fav)
                .collect();

            if json {
                let output: Vec<_> = results
                    .iter()
                    .map(|(item, fav)| listed_json(item, *fav))
                    .collect();
                println!("{}", to_json(&output));
            } else {
                if results.is_empty() {
                    println!("No {} match.", domain);
                    return;
                }
                print_list_table(&results);
            }
        }
        Commands::Info { domain, id, json } => {
            let catalog = load_catalog(&settings);
            let Some(item) = catalog.get(domain, &id) else {
                eprintln!("Item not found in {}: {}", domain, id);
                std::process::exit(1);
            };
            let favorite = block_on(current_favorites(&paths)).contains(domain, &id);
            if json {
                println!("{}", to_json(&listed_json(item, favorite)));
            } else {
                print_info_output(item, favorite);
            }
        }
        Commands::Login { email, name } => block_on(async {
            let session = open_session(&paths);
            let listener = session.start();
            session.ready().await;
            let provider = SignInProvider::Local {
                email,
                display_name: name,
            };
            match session.sign_in(&provider).await {
                Ok(Some(_)) => {
                    // Let the session hydrate (and create) the profile before exiting.
                    listener.stop().await;
                    if let Some(identity) = session.identity() {
                        println!("Signed in as {}", identity.label());
                    }
                }
                Ok(None) => listener.stop().await,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }),
        Commands::Logout => block_on(async {
            let session = open_session(&paths);
            let listener = session.start();
            if let Err(e) = session.sign_out().await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            listener.stop().await;
            println!("Signed out");
        }),
        Commands::Whoami => block_on(async {
            let session = open_session(&paths);
            let listener = session.start();
            let state = session.ready().await;
            listener.stop().await;
            match state {
                AuthState::Authenticated(identity) => {
                    println!("{}", identity.label());
                    println!("        UID:   {}", identity.uid);
                    if let Some(email) = identity.email.as_deref() {
                        println!("        Email: {}", email);
                    }
                }
                _ => println!("Not signed in."),
            }
        }),
        Commands::Fav { domain, id } => {
            let catalog = load_catalog(&settings);
            let Some(item) = catalog.get(domain, &id) else {
                eprintln!("Item not found in {}: {}", domain, id);
                std::process::exit(1);
            };
            block_on(async {
                let session = open_session(&paths);
                let listener = session.start();
                session.ready().await;
                let result = session.toggle_favorite(domain, &item.id).await;
                listener.stop().await;
                match result {
                    Ok(ToggleOutcome::Favorited) => println!("Added {} to favorites", item.name),
                    Ok(ToggleOutcome::NotFavorited) => {
                        println!("Removed {} from favorites", item.name)
                    }
                    Err(ToggleError::SignInRequired) => {
                        eprintln!("Sign in first: agentdir login --email <email>");
                        std::process::exit(1);
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            })
        }
        Commands::Favorites { domain, json } => {
            let catalog = load_catalog(&settings);
            let (state, favorites) = block_on(async {
                let session = open_session(&paths);
                let listener = session.start();
                let state = session.ready().await;
                listener.stop().await;
                (state, session.favorites())
            });
            if !matches!(state, AuthState::Authenticated(_)) {
                eprintln!("Sign in first: agentdir login --email <email>");
                std::process::exit(1);
            }
            let domains: Vec<Domain> = match domain {
                Some(d) => vec![d],
                None => Domain::ALL.to_vec(),
            };
            if json {
                let output: serde_json::Map<_, _> = domains
                    .iter()
                    .map(|d| (d.key().to_string(), serde_json::json!(favorites.ids(*d))))
                    .collect();
                println!("{}", to_json(&output));
            } else {
                print_favorites(&catalog, &favorites, &domains);
            }
        }
        Commands::Submit {
            domain,
            name,
            description,
            category,
            link,
            author,
            tags,
        } => {
            let catalog = load_catalog(&settings);
            let submission = Submission {
                domain,
                name,
                description,
                category,
                link,
                author,
                tags,
            };
            block_on(async {
                let session = open_session(&paths);
                let listener = session.start();
                let submitted_by = session.ready().await;
                listener.stop().await;
                let submitted_by = match submitted_by {
                    AuthState::Authenticated(identity) => Some(identity.uid),
                    _ => None,
                };
                let store = JsonSubmissionStore::new(paths.submissions_dir());
                match agentdir::submit(&store, &catalog, submission, submitted_by).await {
                    Ok(id) => println!("Submitted for review: {}", id),
                    Err(SubmitError::Invalid(e)) => {
                        eprintln!("Invalid submission: {}", e);
                        std::process::exit(1);
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            })
        }
        Commands::Config { action } => match action {
            ConfigAction::Set { key, value } => match config::set_config_value(&paths, &key, &value) {
                Ok(()) => println!("Set {} = {}", key, value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            },
            ConfigAction::Get { key, json } => {
                let config = match config::read_config(&paths) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                };
                if let Some(k) = key {
                    match config.get(&k) {
                        Some(v) => {
                            if json {
                                println!("{}", to_json(v));
                            } else {
                                println!("{}", display_value(v));
                            }
                        }
                        None => {
                            eprintln!("Config key not found: {}", k);
                            std::process::exit(1);
                        }
                    }
                } else if json {
                    println!("{}", to_json(&config));
                } else if config.is_empty() {
                    println!("No config set.");
                } else {
                    for (k, v) in &config {
                        println!("{} = {}", k, display_value(v));
                    }
                }
            }
        },
    }
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run `future` on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> F::Output {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    runtime.block_on(future)
}

/// Must run outside the async runtime: remote catalogs use a blocking client.
fn load_catalog(settings: &Settings) -> Catalog {
    let location = settings.catalog_location();
    match Catalog::open(&location) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn open_session(paths: &Paths) -> Session {
    let auth = Arc::new(LocalAuth::open(paths.session_file()));
    let store = Arc::new(JsonProfileStore::new(paths.profiles_dir()));
    Session::new(auth, store)
}

/// Favorites of whoever is signed in; empty when nobody is.
async fn current_favorites(paths: &Paths) -> FavoritesState {
    let session = open_session(paths);
    let listener = session.start();
    session.ready().await;
    listener.stop().await;
    session.favorites()
}

fn listed_json(item: &CatalogItem, favorite: bool) -> serde_json::Value {
    let mut value = serde_json::to_value(item).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("favorite".to_string(), serde_json::Value::Bool(favorite));
    }
    value
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn display_value(v: &serde_json::Value) -> String {
    v.as_str().map(String::from).unwrap_or_else(|| v.to_string())
}

fn star(favorite: bool) -> &'static str {
    if favorite {
        " *"
    } else {
        ""
    }
}

fn print_info_output(item: &CatalogItem, favorite: bool) {
    const INDENT: &str = "        ";

    println!("{}{}", item.id, star(favorite));
    println!("{}Name:        {}", INDENT, item.name);
    println!("{}Category:    {}", INDENT, item.category);
    if let Some(source) = item.source {
        println!("{}Source:      {}", INDENT, source);
    }
    if let Some(a) = item.author.as_deref().filter(|x| !x.is_empty()) {
        println!("{}Author:      {}", INDENT, a);
    }
    if !item.tags.is_empty() {
        println!("{}Tags:        {}", INDENT, item.tags.join(", "));
    }
    if let Some(l) = item.link.as_deref().filter(|x| !x.is_empty()) {
        println!("{}Link:        {}", INDENT, l);
    }
    if !item.description.is_empty() {
        println!("{}Description:", INDENT);
        for line in item.description.lines() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                println!("{}{}{}", INDENT, INDENT, trimmed);
            }
        }
    }
}

fn print_list_table(items: &[(&CatalogItem, bool)]) {
    const INDENT: &str = "        ";

    for (item, favorite) in items {
        println!("{}{}", item.id, star(*favorite));
        println!("{}Name:      {}", INDENT, item.name);
        println!("{}Category:  {}", INDENT, item.category);
        if let Some(source) = item.source {
            println!("{}Source:    {}", INDENT, source);
        }
        if !item.description.is_empty() {
            println!(
                "{}Summary:   {}",
                INDENT,
                item.description.lines().next().unwrap_or("").trim()
            );
        }
        println!();
    }
}

fn print_favorites(catalog: &Catalog, favorites: &FavoritesState, domains: &[Domain]) {
    const INDENT: &str = "        ";

    if domains.iter().all(|d| favorites.ids(*d).is_empty()) {
        println!("No favorites yet. Add one with: agentdir fav <domain> <id>");
        return;
    }
    for domain in domains {
        let ids = favorites.ids(*domain);
        if ids.is_empty() {
            continue;
        }
        println!("{}", domain);
        for id in ids {
            match catalog.get(*domain, id) {
                Some(item) => println!("{}{:<24} {}", INDENT, id, item.name),
                None => println!("{}{:<24} (no longer in catalog)", INDENT, id),
            }
        }
    }
}
