//! Session lifecycle events.

use mockall::automock;

/// Observer notified when the session is cleared, whether by logout or by a
/// terminal failure. Consumers subscribe explicitly on the client; there is
/// no ambient event channel.
#[automock]
pub trait SessionObserver: Send + Sync {
    /// Both tokens and the stored profile have just been cleared.
    fn session_cleared(&self);
}
