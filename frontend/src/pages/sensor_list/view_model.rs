use super::{
    repository::SensorListRepository,
    utils::{build_create_sensor, DELETE_SUCCESS_MESSAGE},
};
use crate::{
    api::{ApiClient, ApiError, Sensor, SensorQuery},
    config::SENSOR_PAGE_SIZE,
    state::session::{use_session, SessionStore},
    utils::RequestSequencer,
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct SensorFormState {
    pub name: RwSignal<String>,
    pub model: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl Default for SensorFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            model: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
        }
    }
}

impl SensorFormState {
    fn clear(&self) {
        self.name.set(String::new());
        self.model.set(String::new());
        self.description.set(String::new());
    }
}

#[derive(Clone)]
pub struct SensorListViewModel {
    pub sensors: RwSignal<Vec<Sensor>>,
    pub page: RwSignal<u32>,
    pub has_next: RwSignal<bool>,
    pub has_previous: RwSignal<bool>,
    /// Text in the search box; only applied by [`SensorListViewModel::search`].
    pub search_input: RwSignal<String>,
    pub applied_query: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub creating: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    pub notice: RwSignal<Option<String>>,
    pub form: SensorFormState,
    pub pending_delete: RwSignal<Option<Sensor>>,
    repo: SensorListRepository,
    session: SessionStore,
    sequencer: RequestSequencer,
}

impl SensorListViewModel {
    pub fn new(repo: SensorListRepository, session: SessionStore) -> Self {
        Self {
            sensors: create_rw_signal(Vec::new()),
            page: create_rw_signal(1),
            has_next: create_rw_signal(false),
            has_previous: create_rw_signal(false),
            search_input: create_rw_signal(String::new()),
            applied_query: create_rw_signal(String::new()),
            loading: create_rw_signal(false),
            creating: create_rw_signal(false),
            error: create_rw_signal(None),
            notice: create_rw_signal(None),
            form: SensorFormState::default(),
            pending_delete: create_rw_signal(None),
            repo,
            session,
            sequencer: RequestSequencer::new(),
        }
    }

    fn current_query(&self) -> SensorQuery {
        SensorQuery {
            page: self.page.get_untracked(),
            page_size: SENSOR_PAGE_SIZE,
            q: self.applied_query.get_untracked(),
        }
    }

    /// Loads the current page. Responses overtaken by a newer fetch are dropped.
    pub async fn fetch(&self) {
        let ticket = self.sequencer.issue();
        let query = self.current_query();
        let session = self.session.get_untracked();
        let on_unauthorized = self.session.unauthorized_handler();

        self.loading.set(true);
        let result = self
            .repo
            .fetch_page(&session, &query, &on_unauthorized)
            .await;
        if !self.sequencer.is_current(ticket) {
            log::debug!("dropping stale sensor page {}", query.page);
            return;
        }
        self.loading.set(false);

        match result {
            Ok(Some(page)) => {
                self.error.set(None);
                self.sensors.set(page.items);
                self.has_next.set(page.has_next);
                self.has_previous.set(page.has_previous);
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err)),
        }
    }

    pub async fn search(&self) {
        self.applied_query.set(self.search_input.get_untracked());
        self.page.set(1);
        self.error.set(None);
        self.fetch().await;
    }

    pub async fn reset_search(&self) {
        self.search_input.set(String::new());
        self.applied_query.set(String::new());
        self.page.set(1);
        self.error.set(None);
        self.fetch().await;
    }

    pub async fn next_page(&self) {
        if !self.has_next.get_untracked() {
            return;
        }
        self.page.update(|page| *page += 1);
        self.fetch().await;
    }

    pub async fn previous_page(&self) {
        if !self.has_previous.get_untracked() || self.page.get_untracked() <= 1 {
            return;
        }
        self.page.update(|page| *page -= 1);
        self.fetch().await;
    }

    /// Creates a sensor and appends the server's copy to the visible list.
    pub async fn add_sensor(&self) {
        if self.creating.get_untracked() {
            return;
        }
        self.error.set(None);
        self.notice.set(None);
        let payload = match build_create_sensor(
            &self.form.name.get_untracked(),
            &self.form.model.get_untracked(),
            &self.form.description.get_untracked(),
        ) {
            Ok(payload) => payload,
            Err(err) => {
                self.error.set(Some(err));
                return;
            }
        };

        let session = self.session.get_untracked();
        let on_unauthorized = self.session.unauthorized_handler();
        self.creating.set(true);
        let result = self.repo.create(&session, &payload, &on_unauthorized).await;
        self.creating.set(false);

        match result {
            Ok(Some(sensor)) => {
                self.sensors.update(|sensors| sensors.push(sensor));
                self.form.clear();
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err)),
        }
    }

    pub fn request_delete(&self, sensor: Sensor) {
        self.pending_delete.set(Some(sensor));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    /// Deletes the sensor awaiting confirmation. Only a confirmed delete
    /// re-fetches the list.
    pub async fn confirm_delete(&self) {
        let Some(sensor) = self.pending_delete.get_untracked() else {
            return;
        };
        self.pending_delete.set(None);
        self.error.set(None);
        self.notice.set(None);

        let session = self.session.get_untracked();
        let on_unauthorized = self.session.unauthorized_handler();
        match self.repo.delete(&session, sensor.id, &on_unauthorized).await {
            Ok(Some(())) => {
                log::info!("deleted sensor {}", sensor.id);
                self.notice.set(Some(DELETE_SUCCESS_MESSAGE.to_string()));
                self.fetch().await;
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_sensor_list_view_model() -> SensorListViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = SensorListRepository::new_with_client(Rc::new(api));
    SensorListViewModel::new(repo, use_session())
}
