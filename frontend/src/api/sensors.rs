use super::{
    client::{ApiClient, RequestOptions, ResponseBody},
    types::{ApiError, CreateReading, CreateSensor, Reading, ReadingRange, Sensor, SensorPage},
};
use crate::{state::session::Session, utils::query::with_query};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorQuery {
    pub page: u32,
    pub page_size: u32,
    pub q: String,
}

impl SensorQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("q", self.q.clone()),
        ]
    }
}

impl ReadingRange {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from.as_ref().filter(|v| !v.trim().is_empty()) {
            pairs.push(("timestamp_from", from.clone()));
        }
        if let Some(to) = self.to.as_ref().filter(|v| !v.trim().is_empty()) {
            pairs.push(("timestamp_to", to.clone()));
        }
        pairs
    }
}

fn typed<T: serde::de::DeserializeOwned>(
    body: Option<ResponseBody>,
) -> Result<Option<T>, ApiError> {
    body.map(ResponseBody::into_json).transpose()
}

impl ApiClient {
    pub async fn list_sensors(
        &self,
        session: &Session,
        query: &SensorQuery,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<SensorPage>, ApiError> {
        let path = with_query("/api/sensors", &query.to_pairs());
        let body = self
            .call_authenticated(session, &path, RequestOptions::get(), on_unauthorized)
            .await?;
        typed(body)
    }

    pub async fn create_sensor(
        &self,
        session: &Session,
        payload: &CreateSensor,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<Sensor>, ApiError> {
        let body = self
            .call_authenticated(
                session,
                "/api/sensors/",
                RequestOptions::post().json(payload)?,
                on_unauthorized,
            )
            .await?;
        typed(body)
    }

    pub async fn get_sensor(
        &self,
        session: &Session,
        sensor_id: i64,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<Sensor>, ApiError> {
        let path = format!("/api/sensors/{}", sensor_id);
        let body = self
            .call_authenticated(session, &path, RequestOptions::get(), on_unauthorized)
            .await?;
        typed(body)
    }

    /// `Ok(Some(()))` once the server confirmed the delete, with or without a body.
    pub async fn delete_sensor(
        &self,
        session: &Session,
        sensor_id: i64,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<()>, ApiError> {
        let path = format!("/api/sensors/{}/", sensor_id);
        let body = self
            .call_authenticated(session, &path, RequestOptions::delete(), on_unauthorized)
            .await?;
        Ok(body.map(|_| ()))
    }

    pub async fn list_readings(
        &self,
        session: &Session,
        sensor_id: i64,
        range: &ReadingRange,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<Vec<Reading>>, ApiError> {
        let path = with_query(
            &format!("/api/sensors/{}/readings/", sensor_id),
            &range.to_pairs(),
        );
        let body = self
            .call_authenticated(session, &path, RequestOptions::get(), on_unauthorized)
            .await?;
        typed(body)
    }

    pub async fn create_reading(
        &self,
        session: &Session,
        sensor_id: i64,
        payload: &CreateReading,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<Reading>, ApiError> {
        let path = format!("/api/sensors/{}/readings/", sensor_id);
        let body = self
            .call_authenticated(
                session,
                &path,
                RequestOptions::post().json(payload)?,
                on_unauthorized,
            )
            .await?;
        typed(body)
    }
}
