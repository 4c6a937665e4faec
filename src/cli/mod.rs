pub mod app;
pub mod commands;
pub mod compile;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod escape;
pub mod info;
pub mod locator;
pub mod output;
pub mod runtime;
