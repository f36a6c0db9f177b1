//! Interactive confirmation

use tracing::warn;

/// Asks the operator a yes/no question
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    /// Returns true only on an explicit yes
    fn confirm(&self, prompt: &str) -> bool;
}

/// Terminal prompt defaulting to "no"
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        // No terminal, closed stdin or an interrupted prompt all count as "no".
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}
