mod models;
mod render;
mod selector;
mod summary;

pub use models::{Digest, Headline, Section};
pub use render::render;
pub use selector::HeadlineSelector;
pub use summary::summary_snippet;
