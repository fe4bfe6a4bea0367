#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    quill_api::start().await?;
    Ok(())
}
