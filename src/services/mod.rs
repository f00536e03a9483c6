pub mod conversation;
pub mod dialogue;
pub mod render;
pub mod topics;
pub mod validate;
pub mod whatsapp;
