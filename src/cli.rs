use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "countrysrv",
    about = "HTTP server that lists, searches and maps countries from the REST Countries API",
    version,
    author
)]
pub struct Args {
    /// Port to listen on (overrides SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base URL of the REST Countries API (overrides RESTCOUNTRIES_BASE_URL)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Upstream request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Default number of countries per page (overrides PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<usize>,
}
