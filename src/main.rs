use clap::Parser;
use recipe_search::{
    auth::AuthService,
    cli::{self, commands, session::Session, Cli, Commands},
    config::Settings,
    db::{self, users::SqliteCredentialStore},
    index::{open_source, RecipeIndex},
    Result,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout belongs to the terminal front end
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,recipe_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Errors are reported once, through the redacting log path
    ExitCode::from(cli::exit_status(try_main().await))
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(path) = cli.recipes {
        settings.recipes.path = path;
    }
    settings.validate()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(settings).await,
        Commands::Signup { username, password } => signup(settings, username, password).await,
        Commands::Login { username, password } => login(settings, username, password).await,
        Commands::Search { ingredients, json } => load_index(&settings).and_then(|index| {
            commands::search(&index, &ingredients, json, &mut io::stdout().lock())
        }),
        Commands::Show { name } => load_index(&settings)
            .and_then(|index| commands::show(&index, &name, &mut io::stdout().lock())),
        Commands::List => {
            load_index(&settings).and_then(|index| commands::list(&index, &mut io::stdout().lock()))
        }
        Commands::Migrate => migrate(settings).await,
    }
}

fn load_index(settings: &Settings) -> Result<RecipeIndex> {
    let source = open_source(&settings.recipes.path)?;
    RecipeIndex::from_source(source.as_ref())
}

async fn auth_service(settings: &Settings) -> Result<AuthService<SqliteCredentialStore>> {
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;

    Ok(AuthService::new(
        SqliteCredentialStore::new(pool),
        settings.auth.clone(),
    ))
}

async fn run(settings: Settings) -> Result<()> {
    // A bad recipe file is fatal before anyone logs in
    let index = load_index(&settings)?;
    let auth = auth_service(&settings).await?;
    info!("Credential store ready at {}", settings.database.url);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run(&auth, &index).await
}

async fn signup(settings: Settings, username: String, password: Option<String>) -> Result<()> {
    let auth = auth_service(&settings).await?;
    let mut stdout = io::stdout().lock();
    let password = commands::resolve_password(password, &mut io::stdin().lock(), &mut stdout)?;

    commands::signup(&auth, &username, &password, &mut stdout).await
}

async fn login(settings: Settings, username: String, password: Option<String>) -> Result<()> {
    let auth = auth_service(&settings).await?;
    let mut stdout = io::stdout().lock();
    let password = commands::resolve_password(password, &mut io::stdin().lock(), &mut stdout)?;

    commands::login(&auth, &username, &password, &mut stdout).await
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\u{2713} Database migrations completed successfully")?;
    Ok(())
}
