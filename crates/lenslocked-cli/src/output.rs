use crate::cli::OutputFormat;
use colored::Colorize;
use serde_json::Value;

/// Prints a result either as aligned `key: value` lines or as JSON.
pub fn print_record(fields: &[(&str, Value)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let object: serde_json::Map<String, Value> = fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&Value::Object(object)).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in fields {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => "-".to_string(),
                    other => other.to_string(),
                };
                println!("{}  {}", format!("{key:width$}").cyan(), rendered);
            }
        }
    }
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}
