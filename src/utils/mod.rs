//! Helpers around the site's media pipeline

pub mod image;
