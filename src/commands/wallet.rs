//! Wallet balance display.

use crate::error::Result;
use crate::gateway::{http, Gateway};
use crate::output;

/// Show the paying wallet's address and on-chain USDC balance.
pub async fn run(gateway: &dyn Gateway) -> Result<()> {
    let address = gateway.wallet_address().await?;
    let balance = http::usdc_balance(&address).await;
    output::balance(&address, balance, "Base");
    Ok(())
}
