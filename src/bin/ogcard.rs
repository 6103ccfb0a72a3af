fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    ogcard::run(&ogcard::CardConfig::default())?;
    Ok(())
}
