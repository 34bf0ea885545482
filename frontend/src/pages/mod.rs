pub mod article_detail;
pub mod article_new;
pub mod home;
pub mod login;
pub mod signup;
pub mod topics;
