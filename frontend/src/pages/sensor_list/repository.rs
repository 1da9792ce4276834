use crate::{
    api::{ApiClient, ApiError, CreateSensor, Sensor, SensorPage, SensorQuery},
    state::session::Session,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct SensorListRepository {
    client: Rc<ApiClient>,
}

impl Default for SensorListRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorListRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_page(
        &self,
        session: &Session,
        query: &SensorQuery,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<SensorPage>, ApiError> {
        self.client
            .list_sensors(session, query, Some(on_unauthorized))
            .await
    }

    pub async fn create(
        &self,
        session: &Session,
        payload: &CreateSensor,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<Sensor>, ApiError> {
        self.client
            .create_sensor(session, payload, Some(on_unauthorized))
            .await
    }

    pub async fn delete(
        &self,
        session: &Session,
        sensor_id: i64,
        on_unauthorized: &dyn Fn(),
    ) -> Result<Option<()>, ApiError> {
        self.client
            .delete_sensor(session, sensor_id, Some(on_unauthorized))
            .await
    }
}
