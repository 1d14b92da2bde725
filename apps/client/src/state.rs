use crate::confirm::ConfirmationBroker;
use crate::gateway::Gateway;
use crate::notify::NotificationQueue;

/// Services built once in `main` and handed to every command explicitly.
#[derive(Clone)]
pub struct Services {
    pub gateway: Gateway,
    pub notifications: NotificationQueue,
    pub confirmations: ConfirmationBroker,
}
