use crate::{
    api::{ApiClient, ApiError, CreateReading, Reading, ReadingRange, Sensor},
    state::session::Session,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct SensorDetailRepository {
    client: Rc<ApiClient>,
}

impl Default for SensorDetailRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorDetailRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_sensor(
        &self,
        session: &Session,
        sensor_id: i64,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<Sensor>, ApiError> {
        self.client
            .get_sensor(session, sensor_id, Some(on_unauthorized))
            .await
    }

    pub async fn fetch_readings(
        &self,
        session: &Session,
        sensor_id: i64,
        range: &ReadingRange,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<Vec<Reading>>, ApiError> {
        self.client
            .list_readings(session, sensor_id, range, Some(on_unauthorized))
            .await
    }

    pub async fn add_reading(
        &self,
        session: &Session,
        sensor_id: i64,
        payload: &CreateReading,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<Reading>, ApiError> {
        self.client
            .create_reading(session, sensor_id, payload, Some(on_unauthorized))
            .await
    }
}
