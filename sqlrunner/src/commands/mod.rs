// sqlrunner/src/commands/mod.rs

pub mod run;
