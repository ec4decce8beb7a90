pub mod article;
pub mod shortlist;
pub mod newsletter;

pub use article::*;
pub use shortlist::*;
pub use newsletter::*;
