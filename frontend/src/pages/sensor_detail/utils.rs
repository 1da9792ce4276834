use crate::{
    api::{ApiError, CreateReading, ReadingRange},
    utils::time::is_datetime_local,
};

pub const LOADING_MESSAGE: &str = "Loading sensor...";

pub fn parse_sensor_id(raw: Option<&str>) -> Result<i64, ApiError> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or_else(|| ApiError::validation("Invalid sensor id"))
}

fn parse_measurement(raw: &str, label: &str) -> Result<f64, ApiError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("{} must be a number", label)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::validation(format!("{} must be a number", label)))
    }
}

/// Validates the add-reading form. The timestamp is sent exactly as the
/// `datetime-local` input produced it.
pub fn build_create_reading(
    temperature: &str,
    humidity: &str,
    timestamp: &str,
) -> Result<CreateReading, ApiError> {
    let temperature = parse_measurement(temperature, "Temperature")?;
    let humidity = parse_measurement(humidity, "Humidity")?;
    if !is_datetime_local(timestamp) {
        return Err(ApiError::validation("Timestamp is required"));
    }
    Ok(CreateReading {
        temperature,
        humidity,
        timestamp: timestamp.trim().to_string(),
    })
}

pub fn build_range(from: &str, to: &str) -> ReadingRange {
    let bound = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };
    ReadingRange {
        from: bound(from),
        to: bound(to),
    }
}
