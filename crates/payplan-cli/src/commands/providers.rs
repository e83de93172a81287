//! Providers command - list recognized BNPL providers.

use clap::Args;
use console::style;

use payplan_core::extract::PROFILES;

/// Arguments for the providers command.
#[derive(Args)]
pub struct ProvidersArgs {
    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ProvidersArgs) -> anyhow::Result<()> {
    if args.json {
        let listing: Vec<serde_json::Value> = PROFILES
            .iter()
            .map(|profile| {
                serde_json::json!({
                    "provider": profile.provider,
                    "signatures": profile.signatures,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Recognized providers (detection priority order):");
    for profile in PROFILES.iter() {
        println!(
            "  {}  {}",
            style(profile.provider.display_name()).bold(),
            profile.signatures.join(", ")
        );
    }

    Ok(())
}
