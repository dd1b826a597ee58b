//! Fire-and-forget notifications for audio or other feedback.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    Shoot,
    WeaponPickup,
    ShieldPickup,
    ObstacleDestroyed,
    PlayerDeath,
}

/// Receives notifications as the tick produces them. Implementations must not block.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl NotificationSink for Silent {
    fn notify(&mut self, _notification: Notification) {}
}
