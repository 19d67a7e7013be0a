#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quran_companion_backend::run().await
}
