use crate::{
    api::Reading,
    components::empty_state::EmptyState,
    utils::time::format_axis_label,
};
use leptos::*;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 320.0;
const LEFT: f64 = 56.0;
const RIGHT: f64 = WIDTH - 56.0;
const TOP: f64 = 20.0;
const BOTTOM: f64 = HEIGHT - 48.0;
const TICKS: usize = 5;

const TEMPERATURE_COLOR: &str = "#dc2626";
const HUMIDITY_COLOR: &str = "#2563eb";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Bounds of `values`, widened by one unit each way when flat.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        if (max - min).abs() < f64::EPSILON {
            Some(Self {
                min: min - 1.0,
                max: max + 1.0,
            })
        } else {
            Some(Self { min, max })
        }
    }

    /// Vertical pixel position of `value` inside the plot area.
    pub fn project(&self, value: f64) -> f64 {
        BOTTOM - (value - self.min) / (self.max - self.min) * (BOTTOM - TOP)
    }

    pub fn ticks(&self) -> Vec<f64> {
        let step = (self.max - self.min) / (TICKS - 1) as f64;
        (0..TICKS).map(|i| self.min + step * i as f64).collect()
    }
}

/// Evenly spaced x positions, one per reading, in server order.
pub fn x_positions(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![(LEFT + RIGHT) / 2.0],
        n => {
            let step = (RIGHT - LEFT) / (n - 1) as f64;
            (0..n).map(|i| LEFT + step * i as f64).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub range: AxisRange,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn build(xs: &[f64], values: &[f64]) -> Option<Self> {
        let range = AxisRange::from_values(values.iter().copied())?;
        let points = xs
            .iter()
            .zip(values)
            .map(|(x, v)| (*x, range.project(*v)))
            .collect();
        Some(Self { range, points })
    }

    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Both series share the x axis; each has its own y scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub temperature: Series,
    pub humidity: Series,
    pub labels: Vec<(f64, String)>,
}

pub fn build_chart(readings: &[Reading]) -> Option<ChartModel> {
    let xs = x_positions(readings.len());
    let temperatures: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
    let humidities: Vec<f64> = readings.iter().map(|r| r.humidity).collect();
    Some(ChartModel {
        temperature: Series::build(&xs, &temperatures)?,
        humidity: Series::build(&xs, &humidities)?,
        labels: axis_labels(&xs, readings),
    })
}

// At most five labels so they never overlap.
fn axis_labels(xs: &[f64], readings: &[Reading]) -> Vec<(f64, String)> {
    let stride = readings.len().div_ceil(TICKS).max(1);
    xs.iter()
        .zip(readings)
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, (x, r))| (*x, format_axis_label(&r.timestamp)))
        .collect()
}

#[component]
pub fn ReadingsChart(#[prop(into)] readings: Signal<Vec<Reading>>) -> impl IntoView {
    let model = create_memo(move |_| readings.with(|r| build_chart(r)));

    move || match model.get() {
        None => view! { <EmptyState title="No readings yet." /> }.into_view(),
        Some(chart) => view! { <ChartSvg chart=chart /> }.into_view(),
    }
}

#[component]
fn ChartSvg(chart: ChartModel) -> impl IntoView {
    let left_ticks = chart.temperature.range.ticks();
    let right_ticks = chart.humidity.range.ticks();
    let temperature_range = chart.temperature.range;
    let humidity_range = chart.humidity.range;

    view! {
        <figure class="w-full overflow-x-auto">
            <svg
                viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)
                class="w-full h-auto"
                role="img"
                aria-label="Temperature and humidity readings"
            >
                <line x1=LEFT y1=BOTTOM x2=RIGHT y2=BOTTOM stroke="currentColor" stroke-opacity="0.4"/>
                <line x1=LEFT y1=TOP x2=LEFT y2=BOTTOM stroke=TEMPERATURE_COLOR/>
                <line x1=RIGHT y1=TOP x2=RIGHT y2=BOTTOM stroke=HUMIDITY_COLOR/>

                {left_ticks.into_iter().map(|tick| {
                    let y = temperature_range.project(tick);
                    view! {
                        <text x={LEFT - 6.0} y={y + 4.0} text-anchor="end" font-size="11" fill=TEMPERATURE_COLOR>
                            {format!("{:.1}", tick)}
                        </text>
                    }
                }).collect_view()}
                {right_ticks.into_iter().map(|tick| {
                    let y = humidity_range.project(tick);
                    view! {
                        <text x={RIGHT + 6.0} y={y + 4.0} text-anchor="start" font-size="11" fill=HUMIDITY_COLOR>
                            {format!("{:.1}", tick)}
                        </text>
                    }
                }).collect_view()}
                <text x=LEFT y={TOP - 6.0} text-anchor="middle" font-size="12" fill=TEMPERATURE_COLOR>"°C"</text>
                <text x=RIGHT y={TOP - 6.0} text-anchor="middle" font-size="12" fill=HUMIDITY_COLOR>"%"</text>

                {chart.labels.into_iter().map(|(x, label)| view! {
                    <text x=x y={BOTTOM + 18.0} text-anchor="middle" font-size="11" fill="currentColor">
                        {label}
                    </text>
                }).collect_view()}

                <polyline
                    points=chart.temperature.polyline()
                    fill="none"
                    stroke=TEMPERATURE_COLOR
                    stroke-width="2"
                />
                <polyline
                    points=chart.humidity.polyline()
                    fill="none"
                    stroke=HUMIDITY_COLOR
                    stroke-width="2"
                />
                {chart.temperature.points.iter().map(|(x, y)| view! {
                    <circle cx={*x} cy={*y} r="3" fill=TEMPERATURE_COLOR/>
                }).collect_view()}
                {chart.humidity.points.iter().map(|(x, y)| view! {
                    <circle cx={*x} cy={*y} r="3" fill=HUMIDITY_COLOR/>
                }).collect_view()}
            </svg>
            <figcaption class="flex justify-center gap-6 text-sm mt-2">
                <span style=format!("color: {}", TEMPERATURE_COLOR)>"Temperature (°C)"</span>
                <span style=format!("color: {}", HUMIDITY_COLOR)>"Humidity (%)"</span>
            </figcaption>
        </figure>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64, timestamp: &str) -> Reading {
        Reading {
            id: None,
            sensor_id: None,
            temperature,
            humidity,
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn axis_range_widens_flat_series() {
        let range = AxisRange::from_values([20.0, 20.0]).unwrap();
        assert_eq!(range, AxisRange { min: 19.0, max: 21.0 });
        assert!(AxisRange::from_values(Vec::new()).is_none());
    }

    #[test]
    fn projection_maps_bounds_to_plot_edges() {
        let range = AxisRange { min: 0.0, max: 100.0 };
        assert_eq!(range.project(0.0), BOTTOM);
        assert_eq!(range.project(100.0), TOP);
        assert_eq!(range.ticks().len(), TICKS);
    }

    #[test]
    fn series_keep_server_order_with_independent_scales() {
        let readings = vec![
            reading(21.5, 40.0, "2024-01-01T00:00"),
            reading(18.0, 80.0, "2024-01-01T01:00"),
            reading(25.0, 60.0, "2024-01-01T02:00"),
        ];
        let chart = build_chart(&readings).unwrap();

        let xs: Vec<f64> = chart.temperature.points.iter().map(|p| p.0).collect();
        assert_eq!(xs, x_positions(3));
        assert!(xs.windows(2).all(|w| w[0] < w[1]));

        // Highest temperature and highest humidity both reach the top edge.
        assert_eq!(chart.temperature.points[2].1, TOP);
        assert_eq!(chart.humidity.points[1].1, TOP);
        assert_eq!(chart.temperature.range, AxisRange { min: 18.0, max: 25.0 });
        assert_eq!(chart.humidity.range, AxisRange { min: 40.0, max: 80.0 });
        assert_eq!(chart.labels[0].1, "01-01 00:00");
    }

    #[test]
    fn empty_readings_have_no_chart() {
        assert!(build_chart(&[]).is_none());
    }

    #[test]
    fn labels_are_thinned_for_long_series() {
        let readings: Vec<Reading> = (0..20)
            .map(|i| reading(20.0, 50.0, &format!("2024-01-01T{:02}:00", i)))
            .collect();
        let chart = build_chart(&readings).unwrap();
        assert!(chart.labels.len() <= TICKS);
    }
}
