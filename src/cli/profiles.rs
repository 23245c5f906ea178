use crate::cli::ProfilesArgs;
use crate::config::{Config, BUILTIN_PROFILES};

pub fn execute(args: ProfilesArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(&args.config)?;

    println!("Built-in profiles:");
    for profile in BUILTIN_PROFILES {
        let marker = if profile.name == config.profile { "*" } else { " " };
        println!(
            " {} {:<14} {}",
            marker,
            profile.name,
            profile.categories.join(", ")
        );
    }

    if !config.profiles.is_empty() {
        println!("\nConfigured profiles:");
        for (name, profile) in &config.profiles {
            let marker = if *name == config.profile { "*" } else { " " };
            println!(
                " {} {:<14} {}",
                marker,
                name,
                profile.categories.join(", ")
            );
        }
    }

    Ok(())
}
