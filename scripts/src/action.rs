use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::{config, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    /// File name under `migrations/`, e.g. `0001_init.sql`
    #[arg(short, long)]
    file: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Applies a migration file to the configured database
    RunMigrations(RunMigrationsArgs),
    /// Lists the tables of the configured database
    ListTables,
}

/// Maintenance tasks of the Barkive database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;
        let db_pool = utils::setup_sqlite_db_pool(app_config).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                utils::run_migrations(&db_pool, file).await?;
                println!("{file} applied");
            }
            Action::ListTables => {
                for table in utils::list_tables(&db_pool).await? {
                    println!("{table}");
                }
            }
        }

        Ok(())
    }
}
