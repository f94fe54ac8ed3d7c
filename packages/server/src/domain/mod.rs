//! Domain layer: playback state, value objects and the collaborator traits
//! (state store, message pusher, media source) implemented by the
//! infrastructure layer.

pub mod entity;
pub mod error;
pub mod media;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod value_object;

pub use entity::PlaybackState;
pub use error::RangeError;
pub use media::{
    ByteRange, MediaReader, MediaSource, parse_range_start, unsatisfied_content_range,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use repository::PlaybackStateRepository;
pub use value_object::{ConnectionId, Timestamp};
