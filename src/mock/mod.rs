pub mod vehicle_control;
