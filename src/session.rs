//! Identity session: tracks who is signed in, hydrates favorites from the
//! profile store, and runs the optimistic favorites toggle.
//!
//! Every identity transition bumps an epoch. Hydration results and toggle
//! rollbacks that finish after a newer transition are dropped, so late remote
//! results never leak into a different (or anonymous) session.
//!
//! Toggles issued while a profile is still hydrating wait until hydration has
//! settled, then apply on top of the hydrated favorites.
//!
//! Auth changes are applied in arrival order and immediately; only the profile
//! fetch that follows a sign-in runs in the background.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::auth::{AuthProvider, SignInProvider, Subscription};
use crate::bootstrap;
use crate::error::{AuthError, ToggleError};
use crate::favorites::{FavoritesState, PendingToggle, ToggleOutcome};
use crate::models::{Domain, Identity};
use crate::store::ProfileStore;

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The auth provider has not reported yet.
    Loading,
    Authenticated(Identity),
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Hydrating,
    Settled,
}

struct Shared {
    auth: AuthState,
    epoch: u64,
    favorites: FavoritesState,
}

type ToggleKey = (Domain, String);

struct Inner {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn ProfileStore>,
    shared: Mutex<Shared>,
    phase: watch::Sender<Phase>,
    toggle_turns: Mutex<HashMap<ToggleKey, Arc<tokio::sync::Mutex<()>>>>,
}

/// Session context handed to the consuming layer. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

/// Running auth subscription. Dropping it stops listening.
pub struct Listener {
    subscription: Subscription,
    task: JoinHandle<()>,
}

impl Listener {
    /// Unsubscribe and wait for already-delivered changes, including their
    /// hydration, to be handled.
    pub async fn stop(self) {
        self.subscription.unsubscribe();
        if let Err(e) = self.task.await {
            tracing::warn!("auth listener task failed: {}", e);
        }
    }
}

fn log_hydration_exit(done: Result<(), JoinError>) {
    if let Err(e) = done {
        tracing::warn!("profile hydration task failed: {}", e);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Session {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn ProfileStore>) -> Self {
        let (phase, _) = watch::channel(Phase::Loading);
        Self {
            inner: Arc::new(Inner {
                auth,
                store,
                shared: Mutex::new(Shared {
                    auth: AuthState::Loading,
                    epoch: 0,
                    favorites: FavoritesState::default(),
                }),
                phase,
                toggle_turns: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Subscribe to the auth provider. Each change is applied to the session
    /// as soon as it arrives; profile hydration then runs on its own task, so
    /// a sign-out is visible even while an earlier fetch is still pending.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Listener {
        let (tx, mut rx) = mpsc::unbounded_channel::<Option<Identity>>();
        let subscription = self.inner.auth.subscribe(Box::new(move |identity: Option<Identity>| {
            // Receiver gone means the listener stopped.
            let _ = tx.send(identity);
        }));

        let session = self.clone();
        let task = tokio::spawn(async move {
            let mut hydrations: JoinSet<()> = JoinSet::new();
            while let Some(identity) = rx.recv().await {
                while let Some(done) = hydrations.try_join_next() {
                    log_hydration_exit(done);
                }
                if let Some((epoch, identity)) = session.transition(identity) {
                    let session = session.clone();
                    hydrations.spawn(async move { session.hydrate(epoch, identity).await });
                }
            }
            while let Some(done) = hydrations.join_next().await {
                log_hydration_exit(done);
            }
        });

        Listener { subscription, task }
    }

    pub fn state(&self) -> AuthState {
        lock(&self.inner.shared).auth.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        match &lock(&self.inner.shared).auth {
            AuthState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// Snapshot of the local favorites, including unconfirmed toggles.
    pub fn favorites(&self) -> FavoritesState {
        lock(&self.inner.shared).favorites.clone()
    }

    pub fn is_favorite(&self, domain: Domain, item_id: &str) -> bool {
        lock(&self.inner.shared).favorites.contains(domain, item_id)
    }

    /// Wait until the first auth state has arrived and any hydration is done.
    pub async fn ready(&self) -> AuthState {
        self.wait_settled().await;
        self.state()
    }

    async fn wait_settled(&self) {
        let mut phase = self.inner.phase.subscribe();
        // The sender lives in `inner`, which outlives this borrow.
        let _ = phase.wait_for(|p| *p == Phase::Settled).await;
    }

    /// Start sign-in. Returns `Ok(None)` when the user cancelled. The session
    /// itself changes when the provider reports the new identity.
    pub async fn sign_in(&self, provider: &SignInProvider) -> Result<Option<Identity>, AuthError> {
        match self.inner.auth.sign_in(provider).await {
            Ok(identity) => Ok(Some(identity)),
            Err(e) if e.is_user_cancelled() => {
                tracing::debug!(%provider, "sign-in cancelled by user");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(%provider, "sign-in failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.auth.sign_out().await
    }

    /// Apply an identity change reported by the auth provider and wait for
    /// the profile hydration it starts.
    pub async fn handle_auth_change(&self, identity: Option<Identity>) {
        if let Some((epoch, identity)) = self.transition(identity) {
            self.hydrate(epoch, identity).await;
        }
    }

    /// Switch the session to `identity`. Returns the epoch and identity to
    /// hydrate, or `None` when there is nothing to fetch.
    fn transition(&self, identity: Option<Identity>) -> Option<(u64, Identity)> {
        let mut shared = lock(&self.inner.shared);
        let same_account = matches!(
            (&shared.auth, &identity),
            (AuthState::Authenticated(current), Some(next)) if current.uid == next.uid
        );
        if same_account {
            // Same account re-reported (e.g. refreshed profile fields).
            if let Some(next) = identity {
                shared.auth = AuthState::Authenticated(next);
            }
            return None;
        }

        shared.epoch += 1;
        shared.favorites.clear();
        let epoch = shared.epoch;
        match identity {
            Some(identity) => {
                shared.auth = AuthState::Authenticated(identity.clone());
                self.inner.phase.send_replace(Phase::Hydrating);
                Some((epoch, identity))
            }
            None => {
                shared.auth = AuthState::Anonymous;
                self.inner.phase.send_replace(Phase::Settled);
                tracing::debug!(epoch, "session is anonymous");
                None
            }
        }
    }

    async fn hydrate(&self, epoch: u64, identity: Identity) {
        tracing::debug!(uid = %identity.uid, epoch, "hydrating favorites");
        let favorites = match bootstrap::fetch_or_create(self.inner.store.as_ref(), &identity).await {
            Ok(profile) => profile.favorites,
            Err(e) => {
                tracing::warn!(
                    uid = %identity.uid,
                    "profile bootstrap failed, continuing with empty favorites: {}",
                    e
                );
                FavoritesState::default()
            }
        };

        let mut shared = lock(&self.inner.shared);
        if shared.epoch != epoch {
            tracing::debug!(uid = %identity.uid, epoch, "discarding stale hydration");
            return;
        }
        shared.favorites = favorites;
        self.inner.phase.send_replace(Phase::Settled);
    }

    /// Flip whether `item_id` is a favorite in `domain`.
    ///
    /// The local state changes before the profile store is asked to; if the
    /// store fails, the membership of `item_id` alone is restored and the
    /// error is returned. Toggles of the same item run one at a time in
    /// request order.
    pub async fn toggle_favorite(
        &self,
        domain: Domain,
        item_id: &str,
    ) -> Result<ToggleOutcome, ToggleError> {
        if self.identity().is_none() {
            return Err(ToggleError::SignInRequired);
        }

        let key = (domain, item_id.to_string());
        let turn = self.toggle_turn(&key);
        let result = {
            let _turn = turn.lock().await;
            self.run_toggle(domain, item_id).await
        };
        self.release_toggle_turn(&key, turn);
        result
    }

    async fn run_toggle(
        &self,
        domain: Domain,
        item_id: &str,
    ) -> Result<ToggleOutcome, ToggleError> {
        let (uid, epoch, pending) = loop {
            self.wait_settled().await;
            let mut shared = lock(&self.inner.shared);
            if *self.inner.phase.borrow() != Phase::Settled {
                continue;
            }
            let uid = match &shared.auth {
                AuthState::Authenticated(identity) => identity.uid.clone(),
                _ => return Err(ToggleError::SignInRequired),
            };
            let pending = PendingToggle::apply(&mut shared.favorites, domain, item_id);
            break (uid, shared.epoch, pending);
        };

        tracing::debug!(%domain, item_id, op = ?pending.op(), "favorite toggled locally");
        match self
            .inner
            .store
            .mutate_set_field(&uid, domain, item_id, pending.op())
            .await
        {
            Ok(()) => Ok(pending.outcome()),
            Err(e) => {
                let mut shared = lock(&self.inner.shared);
                if shared.epoch == epoch {
                    pending.compensate(&mut shared.favorites);
                    tracing::warn!(%domain, item_id, "favorite update failed, rolled back: {}", e);
                } else {
                    tracing::debug!(%domain, item_id, "session changed, dropping rollback");
                }
                Err(ToggleError::Remote(e))
            }
        }
    }

    fn toggle_turn(&self, key: &ToggleKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut turns = lock(&self.inner.toggle_turns);
        Arc::clone(turns.entry(key.clone()).or_default())
    }

    fn release_toggle_turn(&self, key: &ToggleKey, turn: Arc<tokio::sync::Mutex<()>>) {
        let mut turns = lock(&self.inner.toggle_turns);
        // One reference in the map plus ours: nobody else is queued.
        if Arc::strong_count(&turn) == 2 {
            turns.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthCallback, Listeners};
    use crate::error::StoreError;
    use crate::favorites::SetOp;
    use crate::models::RemoteProfile;
    use crate::store::MemoryProfileStore;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use tokio::sync::Notify;

    /// Auth provider driven by the test.
    #[derive(Default)]
    struct ScriptedAuth {
        current: Mutex<Option<Identity>>,
        listeners: Listeners,
        next_error: Mutex<Option<AuthError>>,
    }

    impl ScriptedAuth {
        fn report(&self, identity: Option<Identity>) {
            *self.current.lock().unwrap() = identity.clone();
            self.listeners.notify(identity);
        }
    }

    #[async_trait]
    impl AuthProvider for ScriptedAuth {
        async fn sign_in(&self, provider: &SignInProvider) -> Result<Identity, AuthError> {
            if let Some(e) = self.next_error.lock().unwrap().take() {
                return Err(e);
            }
            let mut identity = Identity::new("scripted");
            identity.provider_data = vec![provider.id().to_string()];
            self.report(Some(identity.clone()));
            Ok(identity)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.report(None);
            Ok(())
        }

        fn subscribe(&self, callback: AuthCallback) -> Subscription {
            self.listeners
                .add(callback, self.current.lock().unwrap().clone())
        }
    }

    /// Profile store whose failures and pauses are controlled by the test.
    #[derive(Default)]
    struct ControlledStore {
        inner: MemoryProfileStore,
        failing_items: Mutex<HashSet<String>>,
        fail_get: Mutex<bool>,
        gate: Mutex<Option<Arc<Notify>>>,
        mutations: Mutex<Vec<(String, SetOp)>>,
    }

    impl ControlledStore {
        fn fail_item(&self, id: &str) {
            self.failing_items.lock().unwrap().insert(id.to_string());
        }

        /// Hold every following store call until the returned notify fires.
        fn pause(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
            gate
        }

        async fn wait_gate(&self) {
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl ProfileStore for ControlledStore {
        async fn get(&self, uid: &str) -> Result<Option<RemoteProfile>, StoreError> {
            self.wait_gate().await;
            if *self.fail_get.lock().unwrap() {
                return Err(StoreError::Unavailable("offline".into()));
            }
            self.inner.get(uid).await
        }

        async fn create(&self, uid: &str, profile: &RemoteProfile) -> Result<(), StoreError> {
            self.inner.create(uid, profile).await
        }

        async fn mutate_set_field(
            &self,
            uid: &str,
            domain: Domain,
            item_id: &str,
            op: SetOp,
        ) -> Result<(), StoreError> {
            self.mutations
                .lock()
                .unwrap()
                .push((item_id.to_string(), op));
            self.wait_gate().await;
            if self.failing_items.lock().unwrap().contains(item_id) {
                return Err(StoreError::Unavailable("write rejected".into()));
            }
            self.inner.mutate_set_field(uid, domain, item_id, op).await
        }
    }

    fn setup() -> (Session, Arc<ScriptedAuth>, Arc<ControlledStore>) {
        let auth = Arc::new(ScriptedAuth::default());
        let store = Arc::new(ControlledStore::default());
        let session = Session::new(auth.clone(), store.clone());
        (session, auth, store)
    }

    async fn seed(store: &ControlledStore, uid: &str, domain: Domain, ids: &[&str]) {
        store
            .inner
            .create(uid, &RemoteProfile::for_identity(&Identity::new(uid)))
            .await
            .unwrap();
        for id in ids {
            store
                .inner
                .mutate_set_field(uid, domain, id, SetOp::Add)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn starts_loading_until_provider_reports() {
        let (session, _auth, _store) = setup();
        assert_eq!(session.state(), AuthState::Loading);

        session.handle_auth_change(None).await;
        assert_eq!(session.ready().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn sign_in_hydrates_existing_favorites() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a", "b"]).await;

        session.handle_auth_change(Some(Identity::new("u1"))).await;

        assert!(session.is_favorite(Domain::Skills, "a"));
        assert!(session.is_favorite(Domain::Skills, "b"));
        assert!(matches!(session.state(), AuthState::Authenticated(i) if i.uid == "u1"));
    }

    #[tokio::test]
    async fn bootstrap_failure_degrades_to_empty_favorites() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        *store.fail_get.lock().unwrap() = true;

        session.handle_auth_change(Some(Identity::new("u1"))).await;

        assert!(matches!(session.ready().await, AuthState::Authenticated(_)));
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn sign_out_clears_favorites() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Tools, &["t"]).await;
        session.handle_auth_change(Some(Identity::new("u1"))).await;
        assert!(!session.favorites().is_empty());

        session.handle_auth_change(None).await;

        assert_eq!(session.state(), AuthState::Anonymous);
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn anonymous_toggle_requires_sign_in() {
        let (session, _auth, store) = setup();
        session.handle_auth_change(None).await;

        let err = session.toggle_favorite(Domain::Skills, "x").await.unwrap_err();

        assert!(matches!(err, ToggleError::SignInRequired));
        assert!(session.favorites().is_empty());
        assert!(store.mutations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_persists_to_store() {
        let (session, _auth, store) = setup();
        session.handle_auth_change(Some(Identity::new("u1"))).await;

        let outcome = session.toggle_favorite(Domain::McpServers, "github").await.unwrap();

        assert_eq!(outcome, ToggleOutcome::Favorited);
        assert!(session.is_favorite(Domain::McpServers, "github"));
        let remote = store.inner.get("u1").await.unwrap().unwrap();
        assert!(remote.favorites.contains(Domain::McpServers, "github"));
    }

    #[tokio::test]
    async fn failed_remove_rolls_back() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        session.handle_auth_change(Some(Identity::new("u1"))).await;
        store.fail_item("a");

        let err = session.toggle_favorite(Domain::Skills, "a").await.unwrap_err();

        assert!(matches!(err, ToggleError::Remote(_)));
        let ids: Vec<_> = session.favorites().ids(Domain::Skills).iter().cloned().collect();
        assert_eq!(ids, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn optimistic_update_is_visible_before_store_responds() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        session.handle_auth_change(Some(Identity::new("u1"))).await;
        store.fail_item("a");
        let gate = store.pause();

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.toggle_favorite(Domain::Skills, "a").await }
        });
        tokio::task::yield_now().await;
        while store.mutations.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }

        assert!(!session.is_favorite(Domain::Skills, "a"));
        gate.notify_one();
        assert!(pending.await.unwrap().is_err());
        assert!(session.is_favorite(Domain::Skills, "a"));
    }

    #[tokio::test]
    async fn concurrent_toggles_on_other_items_survive_a_rollback() {
        let (session, _auth, store) = setup();
        session.handle_auth_change(Some(Identity::new("u1"))).await;
        store.fail_item("bad");
        let gate = store.pause();

        let bad = tokio::spawn({
            let session = session.clone();
            async move { session.toggle_favorite(Domain::Tools, "bad").await }
        });
        let good = tokio::spawn({
            let session = session.clone();
            async move { session.toggle_favorite(Domain::Tools, "good").await }
        });
        while store.mutations.lock().unwrap().len() < 2 {
            tokio::task::yield_now().await;
        }
        assert!(session.is_favorite(Domain::Tools, "bad"));
        assert!(session.is_favorite(Domain::Tools, "good"));

        gate.notify_waiters();
        assert!(bad.await.unwrap().is_err());
        assert_eq!(good.await.unwrap().unwrap(), ToggleOutcome::Favorited);

        assert!(!session.is_favorite(Domain::Tools, "bad"));
        assert!(session.is_favorite(Domain::Tools, "good"));
    }

    #[tokio::test]
    async fn double_toggle_applies_in_request_order() {
        let (session, _auth, store) = setup();
        session.handle_auth_change(Some(Identity::new("u1"))).await;

        let (first, second) = tokio::join!(
            session.toggle_favorite(Domain::Plugins, "p"),
            session.toggle_favorite(Domain::Plugins, "p"),
        );

        assert_eq!(first.unwrap(), ToggleOutcome::Favorited);
        assert_eq!(second.unwrap(), ToggleOutcome::NotFavorited);
        assert!(!session.is_favorite(Domain::Plugins, "p"));
        let ops: Vec<_> = store.mutations.lock().unwrap().iter().map(|(_, op)| *op).collect();
        assert_eq!(ops, vec![SetOp::Add, SetOp::Remove]);
    }

    #[tokio::test]
    async fn rollback_after_sign_out_is_discarded() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        session.handle_auth_change(Some(Identity::new("u1"))).await;
        store.fail_item("a");
        let gate = store.pause();

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.toggle_favorite(Domain::Skills, "a").await }
        });
        while store.mutations.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        session.handle_auth_change(None).await;
        gate.notify_one();

        assert!(pending.await.unwrap().is_err());
        assert_eq!(session.state(), AuthState::Anonymous);
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn hydration_finishing_after_sign_out_is_discarded() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        let gate = store.pause();

        let hydration = tokio::spawn({
            let session = session.clone();
            async move { session.handle_auth_change(Some(Identity::new("u1"))).await }
        });
        while session.identity().is_none() {
            tokio::task::yield_now().await;
        }
        session.handle_auth_change(None).await;

        *store.gate.lock().unwrap() = None;
        gate.notify_waiters();
        hydration.await.unwrap();

        assert_eq!(session.state(), AuthState::Anonymous);
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn listener_applies_sign_out_while_profile_fetch_is_pending() {
        let (session, auth, store) = setup();
        seed(&store, "scripted", Domain::Skills, &["a"]).await;
        let listener = session.start();
        assert_eq!(session.ready().await, AuthState::Anonymous);
        let gate = store.pause();

        auth.report(Some(Identity::new("scripted")));
        while session.identity().is_none() {
            tokio::task::yield_now().await;
        }
        auth.report(None);
        while session.state() != AuthState::Anonymous {
            tokio::task::yield_now().await;
        }
        assert!(session.favorites().is_empty());

        *store.gate.lock().unwrap() = None;
        gate.notify_waiters();
        listener.stop().await;

        assert_eq!(session.state(), AuthState::Anonymous);
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn toggle_during_hydration_waits_for_hydrated_state() {
        let (session, _auth, store) = setup();
        seed(&store, "u1", Domain::Skills, &["a"]).await;
        let gate = store.pause();

        let hydration = tokio::spawn({
            let session = session.clone();
            async move { session.handle_auth_change(Some(Identity::new("u1"))).await }
        });
        while session.identity().is_none() {
            tokio::task::yield_now().await;
        }
        let toggle = tokio::spawn({
            let session = session.clone();
            async move { session.toggle_favorite(Domain::Skills, "b").await }
        });
        tokio::task::yield_now().await;
        assert!(store.mutations.lock().unwrap().is_empty());

        *store.gate.lock().unwrap() = None;
        gate.notify_waiters();
        hydration.await.unwrap();
        assert_eq!(toggle.await.unwrap().unwrap(), ToggleOutcome::Favorited);

        assert!(session.is_favorite(Domain::Skills, "a"));
        assert!(session.is_favorite(Domain::Skills, "b"));
    }

    #[tokio::test]
    async fn listener_follows_provider_and_cancelled_sign_in_is_silent() {
        let (session, auth, store) = setup();
        seed(&store, "scripted", Domain::Skills, &["a"]).await;
        let listener = session.start();
        assert_eq!(session.ready().await, AuthState::Anonymous);

        *auth.next_error.lock().unwrap() = Some(AuthError::Cancelled);
        assert_eq!(session.sign_in(&SignInProvider::Github).await, Ok(None));

        *auth.next_error.lock().unwrap() = Some(AuthError::Provider {
            provider: "github.com".into(),
            message: "popup blocked".into(),
        });
        assert!(session.sign_in(&SignInProvider::Github).await.is_err());

        let identity = session.sign_in(&SignInProvider::Github).await.unwrap();
        assert!(identity.is_some());
        listener.stop().await;

        assert!(matches!(session.ready().await, AuthState::Authenticated(i) if i.uid == "scripted"));
        assert!(session.is_favorite(Domain::Skills, "a"));
    }
}
