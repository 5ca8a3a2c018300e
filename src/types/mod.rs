//! Core value types: verbs, repository responses and operation messages.

mod message;
mod request;
mod response;

pub use message::{Message, MessageBody};
pub use request::Verb;
pub use response::{FcrepoResponse, ResponseBody};
