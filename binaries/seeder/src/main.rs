use anyhow::Result;
use clap::Parser;
use events_dao::{MIGRATIONS, PgEventDao};
use events_models::AppClock;
use rand::{SeedableRng, rngs::StdRng};
use seeder::{EventSeeder, cli::Cli};
use sql_connection::{PostgresDbConfig, SqlMigrator, connect_postgres_db};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    let config = PostgresDbConfig::new(cli.get_database_url()).with_pool_size(1, 4);
    let db = connect_postgres_db(&config).await?;
    info!("Connected to database successfully");

    if cli.migrate {
        SqlMigrator::new(db.pool().clone(), MIGRATIONS)
            .run_all_migrations()
            .await?;
    }

    let clock = AppClock::default();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let seeder = EventSeeder::new(PgEventDao::new(db, clock), cli.count);
    seeder.seed(&mut rng, clock.now()).await?;

    Ok(())
}
