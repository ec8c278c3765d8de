use clap::Parser;

fn parse_nonzero_usize(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(n)
}

/// Ringwatch — money-muling pattern detection server for CSV transaction data.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1", env = "RINGWATCH_BIND")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3090", env = "RINGWATCH_PORT")]
    pub port: u16,

    /// Exact browser origin allowed by CORS (the frontend dev server).
    #[arg(
        long,
        default_value = "http://localhost:5173",
        env = "RINGWATCH_CORS_ORIGIN"
    )]
    pub cors_origin: String,

    /// Maximum accepted CSV upload size in bytes.
    #[arg(long, default_value = "10485760", value_parser = parse_nonzero_usize)]
    pub max_upload_bytes: usize,

    /// Maximum number of analysis runs kept in the in-memory history.
    /// Older runs are evicted first.
    #[arg(long, default_value = "100", value_parser = parse_nonzero_usize)]
    pub history_cap: usize,

    /// Wall-clock deadline for the detector phase, in seconds. On expiry
    /// the run completes with empty findings.
    #[arg(long, default_value = "15", value_parser = parse_nonzero_u64)]
    pub detector_timeout_secs: u64,
}

fn parse_nonzero_u64(s: &str) -> Result<u64, String> {
    let n: u64 = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(n)
}
