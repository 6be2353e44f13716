pub mod posters;
pub mod recommender;

pub use posters::{PosterResolver, TmdbPosterResolver};
pub use recommender::recommend;
