pub mod ass;
pub mod error;
pub mod string;
pub mod subtitle;

pub use crate::ass::{Ass, AssTimestamp};
pub use crate::error::KyattoError;
pub use crate::subtitle::{SubtitleFormat, Timestamp};
