pub mod sections;
pub mod shortlist;
pub mod writer;
pub mod pipeline;

pub use pipeline::{BriefOutcome, BriefPipeline, BriefRequest};
pub use sections::{SectionSpec, SECTIONS};
