mod thumbnail_generator;

pub use thumbnail_generator::InfraThumbnailGenerator;
