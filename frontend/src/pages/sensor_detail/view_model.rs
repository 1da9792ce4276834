use super::{
    repository::SensorDetailRepository,
    utils::{build_create_reading, build_range},
};
use crate::{
    api::{ApiClient, ApiError, Reading, Sensor},
    state::session::{use_session, SessionStore},
    utils::{sequencer::Ticket, RequestSequencer},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ReadingFormState {
    pub temperature: RwSignal<String>,
    pub humidity: RwSignal<String>,
    pub timestamp: RwSignal<String>,
}

impl Default for ReadingFormState {
    fn default() -> Self {
        Self {
            temperature: create_rw_signal(String::new()),
            humidity: create_rw_signal(String::new()),
            timestamp: create_rw_signal(String::new()),
        }
    }
}

impl ReadingFormState {
    fn clear(&self) {
        self.temperature.set(String::new());
        self.humidity.set(String::new());
        self.timestamp.set(String::new());
    }
}

#[derive(Clone)]
pub struct SensorDetailViewModel {
    pub sensor_id: i64,
    pub sensor: RwSignal<Option<Sensor>>,
    pub readings: RwSignal<Vec<Reading>>,
    pub form: ReadingFormState,
    pub range_from: RwSignal<String>,
    pub range_to: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    repo: SensorDetailRepository,
    session: SessionStore,
    sequencer: RequestSequencer,
}

impl SensorDetailViewModel {
    pub fn new(sensor_id: i64, repo: SensorDetailRepository, session: SessionStore) -> Self {
        Self {
            sensor_id,
            sensor: create_rw_signal(None),
            readings: create_rw_signal(Vec::new()),
            form: ReadingFormState::default(),
            range_from: create_rw_signal(String::new()),
            range_to: create_rw_signal(String::new()),
            loading: create_rw_signal(false),
            submitting: create_rw_signal(false),
            error: create_rw_signal(None),
            repo,
            session,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Loads the sensor, then its readings for the current range. Both
    /// results are dropped when a newer fetch has started meanwhile.
    pub async fn fetch(&self) {
        let ticket = self.sequencer.issue();
        let session = self.session.get_untracked();
        let on_unauthorized = self.session.unauthorized_handler();
        let range = build_range(
            &self.range_from.get_untracked(),
            &self.range_to.get_untracked(),
        );

        self.loading.set(true);
        let sensor = match self
            .repo
            .fetch_sensor(&session, self.sensor_id, &on_unauthorized)
            .await
        {
            Ok(Some(sensor)) => sensor,
            Ok(None) => return self.finish(ticket),
            Err(err) => {
                if self.sequencer.is_current(ticket) {
                    self.error.set(Some(err));
                }
                return self.finish(ticket);
            }
        };
        let readings = self
            .repo
            .fetch_readings(&session, self.sensor_id, &range, &on_unauthorized)
            .await;

        if !self.sequencer.is_current(ticket) {
            log::debug!("dropping stale readings for sensor {}", self.sensor_id);
            return;
        }
        self.loading.set(false);
        self.sensor.set(Some(sensor));
        match readings {
            Ok(Some(readings)) => {
                self.error.set(None);
                self.readings.set(readings);
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err)),
        }
    }

    fn finish(&self, ticket: Ticket) {
        if self.sequencer.is_current(ticket) {
            self.loading.set(false);
        }
    }

    /// Applies the range inputs and re-fetches.
    pub async fn filter(&self) {
        self.error.set(None);
        self.fetch().await;
    }

    pub async fn clear_filter(&self) {
        self.range_from.set(String::new());
        self.range_to.set(String::new());
        self.filter().await;
    }

    /// Posts the form as a new reading and appends the server's copy.
    pub async fn add_reading(&self) {
        if self.submitting.get_untracked() {
            return;
        }
        self.error.set(None);
        let payload = match build_create_reading(
            &self.form.temperature.get_untracked(),
            &self.form.humidity.get_untracked(),
            &self.form.timestamp.get_untracked(),
        ) {
            Ok(payload) => payload,
            Err(err) => {
                self.error.set(Some(err));
                return;
            }
        };

        let session = self.session.get_untracked();
        let on_unauthorized = self.session.unauthorized_handler();
        self.submitting.set(true);
        let result = self
            .repo
            .add_reading(&session, self.sensor_id, &payload, &on_unauthorized)
            .await;
        self.submitting.set(false);

        match result {
            Ok(Some(reading)) => {
                self.readings.update(|readings| readings.push(reading));
                self.form.clear();
            }
            Ok(None) => {}
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_sensor_detail_view_model(sensor_id: i64) -> SensorDetailViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = SensorDetailRepository::new_with_client(Rc::new(api));
    SensorDetailViewModel::new(sensor_id, repo, use_session())
}
