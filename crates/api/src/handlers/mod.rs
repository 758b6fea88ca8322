pub mod contact;
pub mod messages;
