use crate::api::{ApiError, CreateSensor};

pub const DELETE_SUCCESS_MESSAGE: &str = "Successfully Deleted!";
pub const EMPTY_LIST_MESSAGE: &str = "No sensors found.";

pub fn build_create_sensor(
    name: &str,
    model: &str,
    description: &str,
) -> Result<CreateSensor, ApiError> {
    let name = name.trim();
    let model = model.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    if model.is_empty() {
        return Err(ApiError::validation("Model is required"));
    }
    let description = description.trim();
    Ok(CreateSensor {
        name: name.to_string(),
        model: model.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

pub fn sensor_detail_href(sensor_id: i64) -> String {
    format!("/sensors/{}", sensor_id)
}
