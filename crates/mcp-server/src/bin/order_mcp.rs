use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    order_mcp::main_entry().await
}
