pub mod health;
pub mod insights;
pub mod trainer;
pub mod variations;
