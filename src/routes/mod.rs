pub mod question;

pub use question::app;
