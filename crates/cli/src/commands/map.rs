use std::path::Path;
use std::process;

use recnorm_interchange::{
    bare_record_from_json, record_from_json, record_to_json, schema_from_json, value_to_json,
};
use recnorm_mapper::{map_record_reporting, PolicyKind};

use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) struct MapOptions<'a> {
    pub schema: &'a Path,
    pub policy: Option<PolicyKind>,
    pub destination: Option<&'a str>,
    pub bare: bool,
    /// `None` reads stdin.
    pub records: Option<&'a Path>,
}

pub(crate) fn cmd_map(opts: MapOptions<'_>, config: &Config, output: OutputFormat, quiet: bool) {
    let policy = match (opts.policy, opts.destination) {
        (Some(kind), _) => kind,
        (None, Some(name)) => match config.policy_for(name) {
            Ok(kind) => kind,
            Err(msg) => {
                report_error(&format!("error: {}", msg), output, quiet);
                process::exit(1);
            }
        },
        (None, None) => {
            report_error("error: one of --policy or --destination is required", output, quiet);
            process::exit(1);
        }
    };

    // Read and parse the schema
    let schema_str = match std::fs::read_to_string(opts.schema) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: schema file not found: {}", opts.schema.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let schema_json: serde_json::Value = match serde_json::from_str(&schema_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid JSON in {}: {}", opts.schema.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let schema = match schema_from_json(&schema_json) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error: {}: {}", opts.schema.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let (source, input) = match opts.records {
        Some(path) => (
            path.display().to_string(),
            std::fs::read_to_string(path).map_err(|e| e.to_string()),
        ),
        None => (
            "<stdin>".to_string(),
            std::io::read_to_string(std::io::stdin()).map_err(|e| e.to_string()),
        ),
    };
    let input = match input {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: could not read {}: {}", source, e), output, quiet);
            process::exit(1);
        }
    };

    tracing::info!(policy = %policy, source = %source, "mapping records");

    let mut mapped = Vec::new();
    let mut diagnostics = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let json: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => fail_line(&source, line_no, &format!("invalid JSON: {}", e), output, quiet),
        };
        let decoded = if opts.bare {
            bare_record_from_json(&json, &schema)
        } else {
            record_from_json(&json, &schema)
        };
        let record = match decoded {
            Ok(r) => r,
            Err(e) => fail_line(&source, line_no, &e.to_string(), output, quiet),
        };
        let (record, found) = match map_record_reporting(&record, &schema, policy.mapper()) {
            Ok(result) => result,
            Err(e) => fail_line(&source, line_no, &e.to_string(), output, quiet),
        };

        mapped.push(if opts.bare {
            value_to_json(&record.data)
        } else {
            record_to_json(&record)
        });
        diagnostics.extend(found.into_iter().map(|d| (line_no, d)));
    }

    tracing::info!(
        records = mapped.len(),
        diagnostics = diagnostics.len(),
        "mapping finished"
    );

    match output {
        OutputFormat::Text => {
            for record in &mapped {
                println!("{}", record);
            }
        }
        OutputFormat::Json => {
            let diagnostics: Vec<serde_json::Value> = diagnostics
                .iter()
                .map(|(line, d)| {
                    serde_json::json!({
                        "line": line,
                        "path": d.path,
                        "kind": d.kind,
                        "message": d.message,
                    })
                })
                .collect();
            let json = serde_json::json!({
                "policy": policy.name(),
                "records": mapped,
                "diagnostics": diagnostics,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json)
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
    }
}

fn fail_line(source: &str, line_no: usize, detail: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(&format!("error: {}:{}: {}", source, line_no, detail), output, quiet);
    process::exit(1);
}
