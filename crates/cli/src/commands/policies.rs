use recnorm_mapper::PolicyKind;

use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_policies(config: &Config, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let policies: Vec<serde_json::Value> = PolicyKind::ALL
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "name": kind.name(),
                        "description": kind.description(),
                    })
                })
                .collect();
            let destinations: serde_json::Map<String, serde_json::Value> = config
                .destinations
                .iter()
                .map(|(name, d)| (name.clone(), serde_json::json!(d.policy.name())))
                .collect();
            let json = serde_json::json!({
                "policies": policies,
                "destinations": destinations,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json)
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
        OutputFormat::Text => {
            let width = PolicyKind::ALL
                .iter()
                .map(|kind| kind.name().len())
                .max()
                .unwrap_or(0);
            for kind in PolicyKind::ALL {
                println!("{:<width$}  {}", kind.name(), kind.description(), width = width);
            }
            if !config.destinations.is_empty() {
                println!();
                println!("destinations:");
                for (name, destination) in &config.destinations {
                    println!("  {} -> {}", name, destination.policy);
                }
            }
        }
    }
}
