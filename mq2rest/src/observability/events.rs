//! Canonical structured event names used across `mq2rest`.

// Control-plane and bridge lifecycle events.
pub const ROUTE_REGISTER_OK: &str = "route_register_ok";
pub const BRIDGE_START: &str = "bridge_start";
pub const BRIDGE_SHUTDOWN: &str = "bridge_shutdown";
pub const BROKER_SUBSCRIBE_OK: &str = "broker_subscribe_ok";
pub const BROKER_SUBSCRIBE_FAILED: &str = "broker_subscribe_failed";

// Broker adapter events.
pub const BROKER_CONNECT_OK: &str = "broker_connect_ok";
pub const BROKER_CONNECTION_LOST: &str = "broker_connection_lost";
pub const BROKER_RESUBSCRIBE: &str = "broker_resubscribe";
pub const BROKER_INBOUND_CLOSED: &str = "broker_inbound_closed";
pub const BROKER_INBOUND_DROPPED: &str = "broker_inbound_dropped";
pub const BROKER_CONNECT_TIMEOUT: &str = "broker_connect_timeout";

// Publish worker events.
pub const PUBLISH_WORKER_START: &str = "publish_worker_start";
pub const PUBLISH_WORKER_ABORT: &str = "publish_worker_abort";
pub const PUBLISH_POLL_ATTEMPT: &str = "publish_poll_attempt";
pub const PUBLISH_POLL_FAILED: &str = "publish_poll_failed";
pub const PUBLISH_TRANSLATE_FAILED: &str = "publish_translate_failed";
pub const PUBLISH_EMIT_OK: &str = "publish_emit_ok";
pub const PUBLISH_EMIT_FAILED: &str = "publish_emit_failed";

// Subscribe dispatcher events.
pub const SUBSCRIBE_RECEIVE: &str = "subscribe_receive";
pub const SUBSCRIBE_DROP_UNKNOWN_TOPIC: &str = "subscribe_drop_unknown_topic";
pub const SUBSCRIBE_DROP_UNRESOLVED_CORRELATION: &str = "subscribe_drop_unresolved_correlation";
pub const SUBSCRIBE_DROP_TRANSLATE_FAILED: &str = "subscribe_drop_translate_failed";
pub const SUBSCRIBE_INVOKE_OK: &str = "subscribe_invoke_ok";
pub const SUBSCRIBE_INVOKE_FAILED: &str = "subscribe_invoke_failed";
pub const SUBSCRIBE_CHANNEL_CLOSED: &str = "subscribe_channel_closed";
