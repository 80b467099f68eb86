use anyhow::Result;
use clap::Parser;
use metapack::{command, ReleaseEnv};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the html news fragments; all output is written
    /// here too. Defaults to the current directory.
    #[clap(long)]
    dir: Option<PathBuf>,
    /// Keep the output of every pipeline step on screen
    #[clap(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("METAPACK_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let env = ReleaseEnv::new(dir, args.verbose);
    command::pack(&env)
}
