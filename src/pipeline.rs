use std::path::PathBuf;

use anyhow::Context as _;

use crate::config::CardConfig;
use crate::render::avatar::draw_avatar;
use crate::render::background::{draw_background, draw_overlay};
use crate::render::canvas::Canvas;
use crate::render::text::{draw_site_link, draw_title};

/// Run every drawing step and return the finished canvas without writing it.
///
/// Draw order: background, overlay, site link, title, avatar. The first failing step
/// aborts the run; its error carries the step name as context.
#[tracing::instrument(skip_all)]
pub fn render_card(config: &CardConfig) -> anyhow::Result<Canvas> {
    config.validate().context("validate card config")?;

    let mut canvas = Canvas::new(config.canvas).context("create canvas")?;

    draw_background(&mut canvas, &config.background_path).context("load background image")?;
    draw_overlay(&mut canvas, &config.overlay);
    draw_site_link(&mut canvas, &config.site_link).context("render domain text")?;
    draw_title(&mut canvas, &config.title).context("render title")?;
    draw_avatar(&mut canvas, &config.avatar).context("render me")?;

    Ok(canvas)
}

/// Render the card and write it to `config.output_path`.
///
/// Nothing is written when any step fails.
pub fn run(config: &CardConfig) -> anyhow::Result<PathBuf> {
    let mut canvas = render_card(config)?;
    canvas
        .encode_png(&config.output_path)
        .context("save png")?;
    tracing::info!(path = %config.output_path.display(), "wrote card");
    Ok(config.output_path.clone())
}
