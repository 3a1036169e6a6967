pub(crate) mod appointment_controller;
pub(crate) mod health_check_controller;
pub(crate) mod pet_controller;
pub(crate) mod user_controller;
