//! Schema bootstrap command
//!
//! Usage: salesdb init [--seed]

use super::{CommandResult, Context};
use clap::Args;
use salesdb_store::schema::{ensure_schema, seed_demo};
use tracing::info;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Also insert the demo departments and sellers
    #[arg(long)]
    pub seed: bool,
}

pub fn execute(ctx: &Context, args: InitArgs) -> CommandResult {
    let mut factory = ctx.factory();
    let conn = factory.provider().connection()?;

    ensure_schema(conn)?;
    println!("Schema ready at {}", ctx.config.url);

    if args.seed {
        seed_demo(conn)?;
        info!(url = %ctx.config.url, "demo data seeded");
        println!("Demo data seeded");
    }

    factory.close()?;
    Ok(())
}
