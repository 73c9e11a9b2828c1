use regex::Regex;

use crate::cli::args::{CliArgs, Command};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        crate::output::OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --output-format '{raw}', expected text or json"))?;
    }
    if let Some(endpoint) = args.endpoint.as_deref() {
        reqwest::Url::parse(endpoint.trim())
            .map_err(|e| format!("invalid --endpoint '{endpoint}': {e}"))?;
    }
    match &args.command {
        Command::Search(search) => {
            if let Some(raw) = search.sort.as_deref() {
                crate::query::SortKey::parse(raw).ok_or_else(|| {
                    format!("invalid --sort '{raw}', expected impact, name, recent or none")
                })?;
            }
            if search.limit == Some(0) {
                return Err("invalid limit, expected positive integer".to_string());
            }
        }
        Command::Details(details) => {
            if details.issn.is_some() && details.query.is_some() {
                return Err("use either ISSN or --query, not both".to_string());
            }
            if details.issn.is_none() && details.query.is_none() {
                return Err("no journal ID provided".to_string());
            }
        }
        Command::Recommend(rec) => {
            if rec.text.is_some() && rec.file.is_some() {
                return Err("use either ABSTRACT or --file, not both".to_string());
            }
        }
        Command::Top | Command::Cited | Command::List => {}
    }
    Ok(())
}

/// Loose ISSN shape check (`NNNN-NNNX`). Used for warnings only: the dataset
/// is the authority on identifiers.
pub fn looks_like_issn(value: &str) -> bool {
    match Regex::new(r"^\d{4}-?\d{3}[\dXx]$") {
        Ok(re) => re.is_match(value.trim()),
        Err(_) => true,
    }
}
