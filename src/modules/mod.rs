pub mod audio;
pub mod storage;
pub mod timer;
pub mod ui;
