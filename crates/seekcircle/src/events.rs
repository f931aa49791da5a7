/// Notifications raised by a [`SeekCircle`](crate::SeekCircle), delivered synchronously to every
/// subscribed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekEvent {
    ProgressChanged { progress: i32, from_user: bool },
    TrackingStarted,
    /// `committed` is false when the gesture was cancelled rather than released.
    TrackingStopped { committed: bool },
}
