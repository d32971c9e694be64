use anyhow::Result;
use clap::Parser;
use ponylist::{
    cli::{self, Cli, Outcome},
    logging,
};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init_logging(logging::default_filter(args.verbose, args.quiet))?;
    debug!(?args, "startup");

    // ─── 2) scrape, normalize, write ─────────────────────────────────
    match cli::run(args)? {
        Outcome::Declined => info!("nothing to do"),
        Outcome::Images { saved, sheet } => {
            info!(saved, sheet = %sheet.display(), "images done")
        }
        Outcome::Done { written, .. } => {
            if let Some(path) = written {
                info!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}
