pub mod doctor;
pub mod manifest;
pub mod plan;
pub mod progress;
pub mod run;
pub mod source;
pub mod steps;
pub mod validate;
