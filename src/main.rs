use clap::Parser;
use taglinker::application::{
    density_report, list_posts, run_batch, ConfigService, InitService, LinkerOptions, TagLinker,
};
use taglinker::cli::{
    format_batch_report, format_density_report, format_post_list, Cli, Commands, ScopeArgs,
};
use taglinker::domain::{Action, CategoryId, MarkerAnchors, PostId, RandomSelector, Scope};
use taglinker::error::LinkerError;
use taglinker::infrastructure::{FileSnapshotStore, FileSystemRepository, SiteRepository};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            let label = if e.is_warning() { "Warning" } else { "Error" };
            eprintln!("{}: {}", label, e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "taglinker=debug"
    } else {
        "taglinker=error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn scope_from_args(args: ScopeArgs) -> Scope {
    match (args.post, args.category) {
        (Some(id), _) => Scope::Post(PostId(id)),
        (None, Some(category)) => Scope::Category(CategoryId::from_name(&category)),
        (None, None) => Scope::All,
    }
}

fn process(action: Action, scope: Scope, selector: RandomSelector) -> Result<(), LinkerError> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    let content = repo.content()?;
    let store = FileSnapshotStore::new(repo.snapshot_dir());

    let mut linker = TagLinker::new(content, store, selector, LinkerOptions::from(&config))?;
    let report = run_batch(&mut linker, action, &scope)?;

    println!("{}", format_batch_report(&report));
    Ok(())
}

fn run(cli: Cli) -> Result<(), LinkerError> {
    match cli.command {
        Commands::Init { path, base_url } => {
            let service = InitService::new(FileSystemRepository::new(path.clone()));
            let posts_dir = service.execute(&base_url)?;
            println!("Initialized taglinker site at {}", path.display());
            println!("Posts directory: {}", posts_dir.display());
            Ok(())
        }
        Commands::Apply { scope, seed } => {
            let selector = match seed {
                Some(seed) => RandomSelector::seeded(seed),
                None => RandomSelector::new(),
            };
            process(Action::Apply, scope_from_args(scope), selector)
        }
        Commands::Restore { scope } => {
            process(Action::Restore, scope_from_args(scope), RandomSelector::new())
        }
        Commands::Density { id } => {
            let repo = FileSystemRepository::discover()?;
            let content = repo.content()?;
            let rows = density_report(&content, PostId(id))?;
            print!("{}", format_density_report(&rows));
            Ok(())
        }
        Commands::List { category } => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let content = repo.content()?;
            let store = FileSnapshotStore::new(repo.snapshot_dir());
            let markers = MarkerAnchors::new(&config.marker_class)?;

            let scope = match category {
                Some(name) => Scope::Category(CategoryId::from_name(&name)),
                None => Scope::All,
            };
            let posts = list_posts(&content, &store, &markers, &scope)?;
            print!("{}", format_post_list(&posts));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("base_url = {}", config.base_url);
                println!("posts_dir = {}", config.posts_dir);
                println!("marker_class = {}", config.marker_class);
                println!("whole_words = {}", config.whole_words);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: taglinker config [--list | <key> [<value>]]");
                println!("Valid keys: base_url, posts_dir, marker_class, whole_words, created");
                Ok(())
            }
        }
    }
}
