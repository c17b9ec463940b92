//! Auth capability: sign-in, sign-out and identity subscriptions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::Identity;

/// Callback invoked with the current identity, or `None` when signed out.
pub type AuthCallback = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// Identity provider asked to sign a user in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInProvider {
    Github,
    Google,
    /// Offline sign-in with an email, used by the CLI.
    Local {
        email: String,
        display_name: Option<String>,
    },
}

impl SignInProvider {
    pub fn id(&self) -> &'static str {
        match self {
            SignInProvider::Github => "github.com",
            SignInProvider::Google => "google.com",
            SignInProvider::Local { .. } => "local",
        }
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, provider: &SignInProvider) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register `callback` for identity changes. It is invoked once right away
    /// with the current state. Dropping the returned handle unsubscribes.
    fn subscribe(&self, callback: AuthCallback) -> Subscription;
}

/// Handle for an auth subscription.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Subscriber list shared by auth providers.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Arc<Mutex<ListenerSet>>,
}

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    callbacks: BTreeMap<u64, Arc<AuthCallback>>,
}

impl Listeners {
    /// Add a callback, call it with `current`, and return its handle.
    pub fn add(&self, callback: AuthCallback, current: Option<Identity>) -> Subscription {
        let callback = Arc::new(callback);
        let id = {
            let mut set = lock(&self.inner);
            let id = set.next_id;
            set.next_id += 1;
            set.callbacks.insert(id, Arc::clone(&callback));
            id
        };
        callback(current);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).callbacks.remove(&id);
            }
        })
    }

    /// Invoke every callback with `identity`. Callbacks run outside the lock.
    pub fn notify(&self, identity: Option<Identity>) {
        let callbacks: Vec<_> = lock(&self.inner).callbacks.values().cloned().collect();
        for callback in callbacks {
            callback(identity.clone());
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Auth provider for the CLI. Supports only [`SignInProvider::Local`] and
/// keeps the signed-in identity in a JSON file between runs.
pub struct LocalAuth {
    session_file: PathBuf,
    current: Mutex<Option<Identity>>,
    listeners: Listeners,
}

impl LocalAuth {
    /// Load any identity persisted at `session_file`. A missing or unreadable
    /// file means no one is signed in.
    pub fn open(session_file: impl Into<PathBuf>) -> Self {
        let session_file = session_file.into();
        let current = read_session(&session_file);
        Self {
            session_file,
            current: Mutex::new(current),
            listeners: Listeners::default(),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        lock(&self.current).clone()
    }

    fn set_current(&self, identity: Option<Identity>) {
        *lock(&self.current) = identity.clone();
        self.listeners.notify(identity);
    }
}

/// Stable uid for a local account: UUIDv5 of the lowercased email.
pub fn local_uid(email: &str) -> String {
    let name = email.trim().to_lowercase();
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

fn read_session(path: &Path) -> Option<Identity> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable session file: {}", e);
            None
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn sign_in(&self, provider: &SignInProvider) -> Result<Identity, AuthError> {
        let (email, display_name) = match provider {
            SignInProvider::Local {
                email,
                display_name,
            } => (email.trim(), display_name.clone()),
            other => return Err(AuthError::UnsupportedProvider(other.to_string())),
        };
        if email.is_empty() {
            return Err(AuthError::Cancelled);
        }
        if !email.contains('@') {
            return Err(AuthError::Provider {
                provider: provider.to_string(),
                message: format!("'{email}' is not an email address"),
            });
        }

        let identity = Identity {
            uid: local_uid(email),
            email: Some(email.to_string()),
            display_name,
            photo_url: None,
            email_verified: false,
            provider_data: vec![provider.id().to_string()],
        };

        if let Some(parent) = self.session_file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Persist(e.to_string()))?;
        }
        let output =
            serde_json::to_string_pretty(&identity).map_err(|e| AuthError::Persist(e.to_string()))?;
        tokio::fs::write(&self.session_file, output)
            .await
            .map_err(|e| AuthError::Persist(e.to_string()))?;

        tracing::info!(uid = %identity.uid, "signed in");
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match tokio::fs::remove_file(&self.session_file).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(AuthError::Persist(e.to_string())),
        }
        self.set_current(None);
        Ok(())
    }

    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        self.listeners.add(callback, self.current())
    }
}
