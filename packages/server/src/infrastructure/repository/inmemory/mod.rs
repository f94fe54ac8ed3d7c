mod playback_state;

pub use playback_state::InMemoryPlaybackStateRepository;
