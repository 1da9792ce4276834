pub mod login;
pub mod register;
pub mod sensor_detail;
pub mod sensor_list;
