mod attachment;
pub mod card;
mod severity;

pub use attachment::{Attachment, Field};
pub use card::Message;
pub use severity::card_color;
