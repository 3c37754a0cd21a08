pub mod job_info;
pub mod question;

// Re-export core models for easy access
pub use job_info::{ExperienceLevel, JobInfo};
pub use question::{
    NewQuestion, Question, QuestionChanges, QuestionDifficulty, QuestionRef, QuestionWithOwner,
};
