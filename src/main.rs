use ip2location_downloader::{cli, errors::AppResult};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;

    match rt.block_on(cli::cli())? {
        Some(extracted) => {
            println!("{}", extracted.path.display());
            Ok(())
        }
        None => std::process::exit(1),
    }
}
