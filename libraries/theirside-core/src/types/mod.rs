mod episode;
mod ids;
mod podcast;

pub use episode::{AudioEnclosure, Episode, EpisodeDescriptor};
pub use ids::EpisodeId;
pub use podcast::Podcast;
