//! Session collaborators: credential storage, notifications and lifecycle
//! observers.

mod notify;
mod observer;
mod store;

pub use notify::{MockNotificationSink, NotificationSink, TracingNotifier};
pub use observer::{MockSessionObserver, SessionObserver};
pub use store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, MockCredentialStore, StoreError,
};
