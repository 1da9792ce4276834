#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::ApiClient;
    use crate::state::session::{IntervalScheduler, Session, SessionStore, TimerGuard};
    use crate::utils::storage::MemoryStorage;
    use leptos::*;
    use std::{
        cell::{Cell, RefCell},
        rc::{Rc, Weak},
    };

    type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

    pub fn authenticated_session() -> Session {
        Session {
            id: Some(1),
            username: "a".into(),
            email: "a@b.com".into(),
            is_authenticated: true,
            access_token: "T1".into(),
            refresh_token: "R1".into(),
        }
    }

    /// Counts armed and still-live timers instead of scheduling anything.
    /// Ticks only run when [`FakeScheduler::fire`] is called.
    #[derive(Clone, Default)]
    pub struct FakeScheduler {
        armed: Rc<Cell<usize>>,
        live: Rc<Cell<usize>>,
        last_period: Rc<Cell<Option<u32>>>,
        ticks: Rc<RefCell<Vec<Weak<RefCell<Box<dyn FnMut()>>>>>>,
    }

    struct FakeTimer {
        live: Rc<Cell<usize>>,
        _tick: Tick,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl FakeScheduler {
        pub fn armed(&self) -> usize {
            self.armed.get()
        }

        pub fn live(&self) -> usize {
            self.live.get()
        }

        pub fn last_period(&self) -> Option<u32> {
            self.last_period.get()
        }

        /// Runs every tick whose timer is still alive, as one interval elapsing.
        pub fn fire(&self) {
            let live: Vec<Tick> = self
                .ticks
                .borrow()
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            for tick in live {
                let mut tick = tick.borrow_mut();
                (*tick)();
            }
        }
    }

    impl IntervalScheduler for FakeScheduler {
        fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TimerGuard {
            self.armed.set(self.armed.get() + 1);
            self.live.set(self.live.get() + 1);
            self.last_period.set(Some(period_ms));
            let tick: Tick = Rc::new(RefCell::new(tick));
            self.ticks.borrow_mut().push(Rc::downgrade(&tick));
            TimerGuard::new(FakeTimer {
                live: Rc::clone(&self.live),
                _tick: tick,
            })
        }
    }

    /// Provides `api` and a session store over in-memory storage.
    pub fn provide_session_with_api(api: ApiClient, session: Session) -> SessionStore {
        let api = api.with_storage(Rc::new(MemoryStorage::new()));
        provide_context(api.clone());
        let store = SessionStore::new(api, Rc::new(FakeScheduler::default()), 20_000);
        store.set(session);
        provide_context(store.clone());
        store
    }

    pub fn provide_session(session: Session) -> SessionStore {
        provide_session_with_api(ApiClient::new_with_base_url("http://unused.test"), session)
    }
}
