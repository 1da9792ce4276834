fn main() {
    sensor_dashboard_frontend::run();
}
