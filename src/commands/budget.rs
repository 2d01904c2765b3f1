//! Budget subcommand: set, clear, and inspect the standing daily limit.

use crate::cli::BudgetAction;
use crate::error::Result;
use crate::ledger::SpendingLedger;
use crate::output;

/// Apply one budget action. Mutations persist before this returns.
pub fn run(ledger: &SpendingLedger, action: &BudgetAction) -> Result<()> {
    match action {
        BudgetAction::Set { amount } => {
            ledger.set_budget(*amount)?;
            output::success(&format!("Daily budget set to ${amount:.2}"));
        }
        BudgetAction::Clear => {
            ledger.clear_budget()?;
            output::success("Daily budget cleared; spending is unconstrained");
        }
        BudgetAction::Status => {
            let status = ledger.check_budget()?;
            output::budget_status(
                ledger.get_total()?,
                ledger.get_calls()?,
                ledger.get_limit()?,
                &status,
            );
        }
    }
    Ok(())
}
