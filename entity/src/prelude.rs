pub use super::appointments::Entity as Appointments;
pub use super::pets::Entity as Pets;
pub use super::users::Entity as Users;
