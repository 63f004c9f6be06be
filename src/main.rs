use anyhow::{bail, Context, Result};
use glyphpack::{config::Config, generate, load_font_files};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(config_path) = std::env::args().nth(1) else {
        bail!("usage: glyphpack <config.toml>");
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to read config {config_path}"))?;
    if config.fonts.is_empty() {
        bail!("{config_path} lists no fonts");
    }
    let params = config.to_params()?;

    let sources = load_font_files(&config.fonts).context("failed to load fonts")?;

    let atlas = generate(&sources, &params, &config.output)
        .with_context(|| format!("failed to generate {}", config.output.display()))?;
    log::info!("packed {} glyphs", atlas.layout.placements.len());
    Ok(())
}
