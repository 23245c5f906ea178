use crate::cli::CheckArgs;
use crate::config::Config;
use crate::provider::OllamaVision;
use anyhow::Context;

pub async fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(model) = args.model {
        config.model.name = model;
    }
    config.validate()?;
    let prompt = config.prompt_config()?;

    println!(
        "Config OK: profile '{}' with {} categories",
        prompt.profile(),
        prompt.categories().len()
    );

    let model = OllamaVision::new(&config.model)?;
    let installed = model.preflight().await.with_context(|| {
        format!(
            "Vision model '{}' is not ready at {}",
            config.model.name, config.model.endpoint
        )
    })?;

    println!(
        "Ollama OK at {}: '{}' installed ({} models available)",
        config.model.endpoint,
        config.model.name,
        installed.len()
    );
    Ok(())
}
