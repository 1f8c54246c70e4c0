//! 레이더 도메인 모델.

mod month;
mod nation;
mod record;
mod response;
mod source;

pub use month::*;
pub use nation::*;
pub use record::*;
pub use response::*;
pub use source::*;
