use crate::{
    api::{ApiClient, AuthResponse},
    config,
    utils::storage::{read_json, write_json, KeyValueStore},
};
use leptos::*;
use serde::{Deserialize, Serialize};
use std::{
    any::Any,
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Storage key holding the serialized [`Session`].
pub const SESSION_STORAGE_KEY: &str = "userInfo";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn from_auth_response(response: AuthResponse) -> Self {
        Self {
            id: Some(response.user.id),
            username: response.user.username,
            email: response.user.email,
            is_authenticated: true,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

/// Reads and writes the session under [`SESSION_STORAGE_KEY`].
#[derive(Clone)]
pub struct SessionPersistence {
    storage: Rc<dyn KeyValueStore>,
}

impl SessionPersistence {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Stored session, or the logged-out default when absent or unreadable.
    pub fn load(&self) -> Session {
        match read_json::<Session>(self.storage.as_ref(), SESSION_STORAGE_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => Session::logged_out(),
            Err(err) => {
                log::warn!("discarding stored session: {}", err);
                self.clear();
                Session::logged_out()
            }
        }
    }

    /// Persists an authenticated session; removes the key otherwise.
    pub fn sync(&self, session: &Session) {
        if session.is_authenticated {
            if let Err(err) = write_json(self.storage.as_ref(), SESSION_STORAGE_KEY, session) {
                log::warn!("failed to persist session: {}", err);
            }
        } else {
            self.clear();
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.storage.remove_item(SESSION_STORAGE_KEY) {
            log::warn!("failed to clear session: {}", err);
        }
    }
}

/// Keeps a recurring timer alive; dropping it cancels the timer.
pub struct TimerGuard {
    _handle: Box<dyn Any>,
}

impl TimerGuard {
    pub fn new<T: 'static>(handle: T) -> Self {
        Self {
            _handle: Box::new(handle),
        }
    }
}

pub trait IntervalScheduler {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TimerGuard;
}

/// `setInterval` through gloo; the interval is cleared when the guard drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl IntervalScheduler for BrowserScheduler {
    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> TimerGuard {
        TimerGuard::new(gloo_timers::callback::Interval::new(period_ms, move || {
            tick()
        }))
    }
}

struct StoreInner {
    session: RwSignal<Session>,
    persistence: SessionPersistence,
    api: ApiClient,
    scheduler: Rc<dyn IntervalScheduler>,
    refresh_interval_ms: u32,
    timer: RefCell<Option<TimerGuard>>,
}

/// Current session plus the single refresh timer that keeps it alive.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// Restores the session from the client's storage and arms the refresh
    /// timer if it is authenticated.
    pub fn new(
        api: ApiClient,
        scheduler: Rc<dyn IntervalScheduler>,
        refresh_interval_ms: u32,
    ) -> Self {
        let persistence = SessionPersistence::new(api.storage());
        let initial = persistence.load();
        let store = Self {
            inner: Rc::new(StoreInner {
                session: create_rw_signal(initial.clone()),
                persistence,
                api,
                scheduler,
                refresh_interval_ms,
                timer: RefCell::new(None),
            }),
        };
        store.apply_lifecycle(&initial);
        store
    }

    pub fn signal(&self) -> Signal<Session> {
        self.inner.session.into()
    }

    pub fn get(&self) -> Session {
        self.inner.session.get()
    }

    pub fn get_untracked(&self) -> Session {
        self.inner.session.get_untracked()
    }

    /// Replaces the session wholesale, then persists it and re-arms or
    /// cancels the refresh timer.
    pub fn set(&self, session: Session) {
        self.apply_lifecycle(&session);
        self.inner.session.set(session);
    }

    pub fn logout(&self) {
        self.set(Session::logged_out());
    }

    /// Callback for authenticated calls: the wrapper already removed the stored
    /// copy, this resets the in-memory session.
    pub fn unauthorized_handler(&self) -> impl Fn() + 'static {
        let store = self.clone();
        move || {
            log::info!("session rejected by the server, logging out");
            store.logout();
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn has_refresh_timer(&self) -> bool {
        self.inner.timer.borrow().is_some()
    }

    /// Exchanges the refresh token for a new pair. A failure logs out; a result
    /// that arrives after the session moved on is dropped.
    pub async fn refresh(&self) {
        let current = self.get_untracked();
        if !current.is_authenticated {
            return;
        }
        let token = current.refresh_token;
        let result = self.inner.api.refresh_session(&token).await;
        if self.get_untracked().refresh_token != token {
            log::debug!("session changed during refresh, dropping result");
            return;
        }
        match result {
            Ok(response) => self.set(Session::from_auth_response(response)),
            Err(err) => {
                log::warn!("session refresh failed: {}", err);
                self.logout();
            }
        }
    }

    fn apply_lifecycle(&self, session: &Session) {
        self.inner.persistence.sync(session);
        // Drop the old guard before arming so at most one timer is ever live.
        self.inner.timer.borrow_mut().take();
        if session.is_authenticated {
            let guard = self.arm_refresh_timer();
            *self.inner.timer.borrow_mut() = Some(guard);
        }
    }

    fn arm_refresh_timer(&self) -> TimerGuard {
        let weak: Weak<StoreInner> = Rc::downgrade(&self.inner);
        self.inner.scheduler.every(
            self.inner.refresh_interval_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let store = SessionStore { inner };
                    spawn_local(async move { store.refresh().await });
                }
            }),
        )
    }

    fn stop_refresh(&self) {
        self.inner.timer.borrow_mut().take();
    }
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let store = SessionStore::new(api, Rc::new(BrowserScheduler), config::refresh_interval_ms());
    provide_context(store.clone());
    on_cleanup(move || store.stop_refresh());
    view! { <>{children()}</> }
}

/// The session store provided by [`SessionProvider`].
///
/// # Panics
/// When called outside a `SessionProvider`.
pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("use_session called outside of <SessionProvider>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserSummary;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn session_uses_camel_case_flag_only_for_is_authenticated() {
        let session = Session {
            id: Some(1),
            username: "a".into(),
            email: "a@b.com".into(),
            is_authenticated: true,
            access_token: "T1".into(),
            refresh_token: "R1".into(),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["isAuthenticated"], serde_json::json!(true));
        assert_eq!(value["access_token"], serde_json::json!("T1"));
        assert!(value.get("is_authenticated").is_none());
    }

    #[wasm_bindgen_test]
    fn session_from_auth_response_is_authenticated() {
        let session = Session::from_auth_response(AuthResponse {
            user: UserSummary {
                id: 7,
                username: "kim".into(),
                email: "kim@example.com".into(),
            },
            access_token: "A".into(),
            refresh_token: "R".into(),
        });
        assert!(session.is_authenticated);
        assert_eq!(session.id, Some(7));
        assert_eq!(session.refresh_token, "R");
    }

    #[test]
    fn partial_stored_session_fills_defaults() {
        let session: Session = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(session.username, "a");
        assert!(!session.is_authenticated);
        assert!(session.id.is_none());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::helpers::{authenticated_session, FakeScheduler};
    use crate::test_support::ssr::with_runtime;
    use crate::utils::storage::MemoryStorage;

    fn store_with(
        storage: &MemoryStorage,
        scheduler: &FakeScheduler,
        base_url: &str,
    ) -> SessionStore {
        let api = ApiClient::new_with_base_url(base_url).with_storage(Rc::new(storage.clone()));
        SessionStore::new(api, Rc::new(scheduler.clone()), 20_000)
    }

    #[test]
    fn logged_out_session_leaves_nothing_in_storage() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            storage
                .set_item(SESSION_STORAGE_KEY, r#"{"isAuthenticated":false}"#)
                .unwrap();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            assert!(!store.get_untracked().is_authenticated);
            assert!(storage.is_empty());
            assert_eq!(scheduler.live(), 0);
        });
    }

    #[test]
    fn authenticated_session_is_persisted_verbatim() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            store.set(authenticated_session());

            let stored: Session =
                read_json(&storage, SESSION_STORAGE_KEY).unwrap().unwrap();
            assert_eq!(stored, store.get_untracked());
        });
    }

    #[test]
    fn restores_stored_session_and_arms_timer() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            write_json(&storage, SESSION_STORAGE_KEY, &authenticated_session()).unwrap();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            assert_eq!(store.get_untracked().access_token, "T1");
            assert_eq!(scheduler.live(), 1);
            assert_eq!(scheduler.last_period(), Some(20_000));
        });
    }

    #[test]
    fn corrupt_storage_is_removed_and_treated_as_logged_out() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            storage.set_item(SESSION_STORAGE_KEY, "{not json").unwrap();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            assert!(!store.get_untracked().is_authenticated);
            assert!(storage.get_item(SESSION_STORAGE_KEY).unwrap().is_none());
        });
    }

    #[test]
    fn rearming_keeps_exactly_one_live_timer() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            store.set(authenticated_session());
            store.set(Session {
                access_token: "T2".into(),
                refresh_token: "R2".into(),
                ..authenticated_session()
            });
            store.set(authenticated_session());
            assert_eq!(scheduler.armed(), 3);
            assert_eq!(scheduler.live(), 1);
            assert!(store.has_refresh_timer());

            store.logout();
            assert_eq!(scheduler.live(), 0);
            assert!(!store.has_refresh_timer());
            assert!(storage.is_empty());
        });
    }

    #[test]
    fn unauthorized_handler_resets_session() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            let scheduler = FakeScheduler::default();
            let store = store_with(&storage, &scheduler, "http://unused");
            store.set(authenticated_session());
            let handler = store.unauthorized_handler();
            handler();
            assert!(!store.get_untracked().is_authenticated);
            assert_eq!(scheduler.live(), 0);
        });
    }

    #[tokio::test]
    async fn refresh_replaces_tokens() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/refresh/");
            then.status(200).json_body(serde_json::json!({
                "user": {"id": 1, "username": "a", "email": "a@b.com"},
                "access_token": "T2",
                "refresh_token": "R2"
            }));
        });

        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let scheduler = FakeScheduler::default();
        let store = store_with(&storage, &scheduler, &server.base_url());
        store.set(authenticated_session());

        store.refresh().await;

        let session = store.get_untracked();
        assert!(session.is_authenticated);
        assert_eq!(session.access_token, "T2");
        assert_eq!(session.refresh_token, "R2");
        let request = &server.received()[0];
        assert_eq!(
            request.query_pairs(),
            vec![("token".to_string(), "R1".to_string())]
        );
        assert_eq!(scheduler.live(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn timer_tick_refreshes_the_session() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/refresh/");
            then.status(200).json_body(serde_json::json!({
                "user": {"id": 1, "username": "a", "email": "a@b.com"},
                "access_token": "T2",
                "refresh_token": "R2"
            }));
        });

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let runtime = create_runtime();
                let storage = MemoryStorage::new();
                let scheduler = FakeScheduler::default();
                let store = store_with(&storage, &scheduler, &server.base_url());
                store.set(authenticated_session());

                scheduler.fire();
                for _ in 0..50 {
                    if store.get_untracked().access_token == "T2" {
                        break;
                    }
                    tokio::task::yield_now().await;
                }

                let received = server.received();
                assert_eq!(received.len(), 1);
                assert_eq!(received[0].method, POST);
                assert_eq!(received[0].path, "/api/auth/refresh/");
                assert_eq!(received[0].query.as_deref(), Some("token=R1"));
                let session = store.get_untracked();
                assert_eq!(session.access_token, "T2");
                assert_eq!(session.refresh_token, "R2");
                assert_eq!(scheduler.live(), 1);
                runtime.dispose();
            })
            .await;
    }

    #[tokio::test]
    async fn tick_after_logout_sends_nothing() {
        let server = MockServer::start_async().await;
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let runtime = create_runtime();
                let storage = MemoryStorage::new();
                let scheduler = FakeScheduler::default();
                let store = store_with(&storage, &scheduler, &server.base_url());
                store.set(authenticated_session());
                store.logout();

                scheduler.fire();
                for _ in 0..10 {
                    tokio::task::yield_now().await;
                }

                assert!(server.received().is_empty());
                runtime.dispose();
            })
            .await;
    }

    #[tokio::test]
    async fn failed_refresh_logs_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/refresh/");
            then.status(401)
                .json_body(serde_json::json!({"detail": "Token expired"}));
        });

        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let scheduler = FakeScheduler::default();
        let store = store_with(&storage, &scheduler, &server.base_url());
        store.set(authenticated_session());

        store.refresh().await;

        assert!(!store.get_untracked().is_authenticated);
        assert!(storage.is_empty());
        assert_eq!(scheduler.live(), 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn refresh_is_skipped_when_logged_out() {
        let server = MockServer::start_async().await;
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let scheduler = FakeScheduler::default();
        let store = store_with(&storage, &scheduler, &server.base_url());

        store.refresh().await;

        assert!(server.received().is_empty());
        runtime.dispose();
    }
}
