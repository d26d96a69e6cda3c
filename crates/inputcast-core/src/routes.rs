//! Route paths of the InputCast wire protocol.
//!
//! The server mounts these paths on its HTTP router and the client's remote
//! proxy appends them to its base address, so both sides always agree on the
//! protocol surface. Paths carry no leading slash; the server adds one when
//! mounting.

/// GET — all configuration names.
pub const ALL_CONFIGURATIONS: &str = "api/action/getallconfigurations";

/// GET — all script names.
pub const ALL_SCRIPTS: &str = "api/scripts/getallscripts";

/// GET — one configuration by `?name=` query parameter.
pub const CONFIGURATION: &str = "api/action/getconfiguration";

/// POST — persist an `InputConfiguration` body.
pub const SAVE: &str = "api/action/save";

/// POST — execute the action described by an `ExecutionContext` body.
pub const EXECUTE: &str = "api/action/execute";

/// POST — remove the configuration named by the `?name=` query parameter.
pub const REMOVE_CONFIGURATION: &str = "api/action/removeconfiguration";
