use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mull::run().await
}
