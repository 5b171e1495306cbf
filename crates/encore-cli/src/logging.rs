use anyhow::{anyhow, Result};
use twyg::{LogLevel, OptsBuilder};

/// Install the twyg logger at the named level.
pub fn init(level: &str) -> Result<()> {
    let opts = OptsBuilder::new()
        .coloured(true)
        .level(parse_level(level)?)
        .build()
        .map_err(|e| anyhow!("invalid logging options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow!("could not set up logger: {e:?}"))?;
    Ok(())
}

fn parse_level(level: &str) -> Result<LogLevel> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => Err(anyhow!(
            "unknown log level '{other}' (expected trace, debug, info, warn, or error)"
        )),
    }
}
