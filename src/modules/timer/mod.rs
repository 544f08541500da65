pub mod completion;
pub mod controller;
pub mod countdown;
pub mod spring;
