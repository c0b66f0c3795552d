pub mod home_controller;
pub mod stocks_controller;
pub mod alerts_controller;
pub mod realtime_controller;
pub mod theme_controller;
