//! Data-plane layer.
//!
//! Owns the two message paths of the bridge: publish workers that poll REST
//! endpoints and republish on the broker, and the subscribe dispatcher that
//! relays inbound broker messages to REST endpoints. Both consume routing state
//! resolved by the control plane and talk to the outside world only through the
//! capability traits.

pub(crate) mod publish_worker;
pub(crate) mod subscribe_dispatcher;
