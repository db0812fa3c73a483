pub mod artist;
pub mod show;
pub mod venue;

pub use artist::Artist;
pub use venue::Venue;
