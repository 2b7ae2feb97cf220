//! Common user-facing messages used across Tabula components.
//!
//! These constants keep console wording consistent between the session and the binary.

/// Printed when the user denies a mutating statement.
pub const MSG_ABORTING: &str = "Aborting.";

/// Printed after the user confirms a mutating statement.
pub const MSG_COMMITTING: &str = "Committing to network. This will take a few moments.";

/// Confirmation choice: send the transaction.
pub const CHOICE_CONFIRM: &str = "Confirm: Send this transaction to the network";

/// Confirmation choice: abort.
pub const CHOICE_DENY: &str = "Oops. No, don't send that transaction.";

/// Console banner.
pub const MSG_WELCOME: &str = "Welcome to Tabula";

/// Printed once the session closes.
pub const MSG_GOODBYE: &str = "Goodbye!";

/// Printed when an interrupt closes the session.
pub const MSG_INTERRUPTED: &str = "Caught interrupt signal";

/// Error: read requested with nothing to read.
pub const ERR_EMPTY_STATEMENT: &str = "empty statement";

/// Error: write or create attempted without a signer.
pub const ERR_SIGNER_REQUIRED: &str =
    "To send transactions, you need to specify a privateKey, providerUrl, and chain";
