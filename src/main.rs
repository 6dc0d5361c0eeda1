#[tokio::main]
async fn main() -> anyhow::Result<()> {
    voluntariado::app::run().await
}
