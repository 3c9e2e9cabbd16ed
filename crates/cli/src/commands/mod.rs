pub mod onboard;
pub mod organize;
pub mod tools;
