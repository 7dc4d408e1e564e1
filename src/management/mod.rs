mod session;
mod verifier;

pub use session::SessionManager;
pub use verifier::VerifierManager;
