pub mod contact;
pub mod resume;

pub use contact::ContactRecord;
pub use resume::ResumeDocument;
