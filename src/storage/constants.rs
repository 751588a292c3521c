// Provider defaults
pub const DEFAULT_FS_ROOT: &str = "./storage";
pub const DEFAULT_FS_SHARE: &str = "files";

// Azure endpoint suffix used when no explicit endpoint override is set
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

// Upper bound for a single remote call; a slower backend surfaces as an
// error envelope instead of a hanging request
pub const REMOTE_OP_TIMEOUT_SECS: u64 = 30;
