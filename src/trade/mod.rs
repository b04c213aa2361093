mod input;
mod invocation;
mod reader;
mod request;
mod runner;
mod service;

pub use input::*;
pub use invocation::*;
pub use reader::*;
pub use request::*;
pub use runner::*;
pub use service::*;
