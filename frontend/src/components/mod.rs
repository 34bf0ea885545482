pub mod articles;
pub mod editor;
pub mod layout;
pub mod login_modal;
pub mod reactions;
