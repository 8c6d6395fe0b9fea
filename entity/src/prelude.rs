pub use super::gadget::Entity as Gadget;
pub use super::user::Entity as User;
