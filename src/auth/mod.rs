pub mod extractors;
pub mod guard;
pub mod token;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use guard::{Gate, GateContext, Guard};
pub use token::{issue_token, verify_token, Claims};
