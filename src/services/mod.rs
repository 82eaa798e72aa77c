pub mod brief;
pub mod template;
