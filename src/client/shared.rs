//! Shared client handle
//!
//! The protocol allows one outstanding request per connection, so sharing a
//! client means holding a lock for the duration of each command.

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Client;

/// Cloneable, thread-safe handle to one client
pub struct SharedClient<S = TcpStream> {
    inner: Arc<Mutex<Client<S>>>,
}

impl<S> SharedClient<S> {
    pub fn new(client: Client<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run `f` with exclusive access to the client
    ///
    /// The lock is held until `f` returns, so every command issued inside it
    /// completes before another caller can send.
    pub fn with<R>(&self, f: impl FnOnce(&mut Client<S>) -> R) -> R {
        let mut client = self.inner.lock();
        f(&mut client)
    }
}

impl<S> Clone for SharedClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
