//! Output formatting utilities

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One PID per line
    Text,
    /// JSON array
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Print the final PID sequence to stdout
pub fn print_pids(pids: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for pid in pids {
                println!("{}", pid);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(pids)?);
        }
    }
    Ok(())
}
