pub mod run;
pub mod verify;
