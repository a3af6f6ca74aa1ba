pub mod shell;
pub mod show;
